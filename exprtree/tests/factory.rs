use exprtree::{ExprConfig, ExprError, ExprRef, ExpressionFactory, FactoryConfig, PrettyConfig, config::ColorMode};

#[test]
fn try_create_new_atom_only_succeeds_once() {
    let factory = ExpressionFactory::new();
    let first = factory.try_create_new_atom("v").unwrap();
    assert!(first.is_some());
    assert!(factory.try_create_new_atom("v").unwrap().is_none());

    // Once the atom dies, the symbol is free again.
    drop(first);
    assert!(factory.try_create_new_atom("v").unwrap().is_some());
}

#[test]
fn try_create_new_operator_detects_live_equal_operators() {
    let factory = ExpressionFactory::new();
    let f = factory.make_atom("f").unwrap();
    let x = factory.make_atom("x").unwrap();
    let kept = factory.try_create_new_operator([f.clone(), x.clone()]).unwrap();
    assert!(kept.is_some());
    assert!(factory.try_create_new_operator([f, x]).unwrap().is_none());
}

#[test]
fn fresh_atoms_skip_live_symbols() {
    let factory = ExpressionFactory::new();
    let taken: Vec<ExprRef> = (0..3).map(|i| factory.make_atom(format!("t{i}")).unwrap()).collect();

    let fresh = factory.fresh_atom("t").unwrap();
    assert!(!taken.contains(&fresh));
    assert_eq!(fresh.to_string(), "t3");

    let other = factory.fresh_atom("t").unwrap();
    assert_ne!(fresh, other);
    assert!(factory.fresh_atom("bad prefix").is_err());
}

#[test]
fn dead_nodes_leave_the_registry() {
    let factory = ExpressionFactory::new();
    {
        let e = factory.parse("(f (g x) (g x))").unwrap();
        // f, g, x, (g x) and the root.
        assert_eq!(factory.len(), 5);
        assert!(factory.has_node(&e));
        assert!(factory.has_equivalent_node(&e));
    }
    assert!(factory.is_empty());

    let again = factory.parse("(f (g x) (g x))").unwrap();
    assert_eq!(factory.len(), 5);
    assert!(factory.find_equivalent(&again).is_some());
}

#[test]
fn equivalence_queries_across_factories() {
    let f1 = ExpressionFactory::new();
    let f2 = ExpressionFactory::new();
    let a = f1.parse("(p q)").unwrap();
    assert!(!f2.has_equivalent_node(&a));

    let b = f2.parse("(p q)").unwrap();
    assert!(f2.has_equivalent_node(&a));
    assert!(!f2.has_node(&a));
    assert!(f2.owns(&b) && !f2.owns(&a));
    assert_eq!(f2.find_equivalent(&a), Some(b));
}

#[test]
fn clones_share_the_registry() {
    let factory = ExpressionFactory::new();
    let clone = factory.clone();
    assert_eq!(factory.id(), clone.id());
    assert_eq!(factory.make_atom("s").unwrap(), clone.make_atom("s").unwrap());
    assert_ne!(factory.id(), ExpressionFactory::new().id());
}

#[test]
fn nodes_outlive_their_factory() {
    let factory = ExpressionFactory::with_config(FactoryConfig {
        initial_buckets: 64,
        report_collisions: false,
    });
    let e = factory.parse("(keep (me))").unwrap();
    drop(factory);
    assert_eq!(e.to_string(), "(keep (me))");
    assert_eq!(e.children()[1].children()[0].symbol(), Some("me"));
}

#[test]
fn configuration_from_toml() {
    let config = ExprConfig::from_toml_str(
        r#"
        [factory]
        initial_buckets = 256
        report_collisions = false

        [pretty]
        width = 40
        color = "never"
        "#,
    )
    .unwrap();
    assert_eq!(config.factory.initial_buckets, 256);
    assert!(!config.factory.report_collisions);
    assert_eq!(
        config.pretty,
        PrettyConfig {
            width: 40,
            indent: 2,
            color: ColorMode::Never
        }
    );

    assert_eq!(ExprConfig::from_toml_str("").unwrap(), ExprConfig::default());
    assert!(ExprConfig::from_toml_str("[pretty]\nwidht = 3").is_err());
    assert!(PrettyConfig::from_toml_str("color = \"sometimes\"").is_err());

    // Errors in the factory table surface as configuration errors of the whole document.
    assert!(matches!(
        ExprConfig::from_toml_str("[factory]\ninitial_buckets = \"many\""),
        Err(ExprError::Config(_))
    ));
    assert!(matches!(
        ExprConfig::load_from_toml(std::path::Path::new("/nonexistent/exprtree.toml")),
        Err(ExprError::Io(_))
    ));

    let factory = ExpressionFactory::with_config(config.factory.clone());
    assert_eq!(factory.nodes().config(), &config.factory);
}

#[test]
fn configuration_from_file() {
    let path = std::env::temp_dir().join(format!("exprtree-config-{}.toml", std::process::id()));
    std::fs::write(&path, "[pretty]\nindent = 4\n").unwrap();
    let config = ExprConfig::load_from_toml(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(config.pretty.indent, 4);
    assert_eq!(config.pretty.width, 80);

    assert!(matches!(
        ExprConfig::load_from_toml(&path),
        Err(exprtree::ExprError::Io(_))
    ));
}
