//! RcDoc-based pretty-printer with termcolor annotations for expressions.
//!
//! Operators lay out on one line when they fit the target width. Otherwise the operator
//! position stays on the opening line and each further child goes on its own line, indented
//! under it. The output always parses back into the same expression.

use std::io::{self, Write};

use pretty::{RcDoc, RenderAnnotated};
use termcolor::{Color, ColorSpec, StandardStream, WriteColor};

use crate::{
    config::PrettyConfig,
    expr::{ExprRef, Expression},
    walker::{TraversalOrder, traverse_expression},
};

/// Styles used to annotate parts of the pretty-printed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Parentheses are colored by nesting depth so matching pairs share a color.
    Paren(u8),
    /// Atom in operator position.
    Head,
    Atom,
}

impl Style {
    fn to_color_spec(self) -> ColorSpec {
        let mut s = ColorSpec::new();
        match self {
            Style::Paren(depth) => {
                let fg = match depth % 6 {
                    0 => Color::Blue,
                    1 => Color::Green,
                    2 => Color::White,
                    3 => Color::Yellow,
                    4 => Color::Red,
                    _ => Color::Magenta,
                };
                s.set_fg(Some(fg)).set_dimmed(true);
            }
            Style::Head => {
                s.set_fg(Some(Color::Cyan)).set_bold(true);
            }
            Style::Atom => {
                s.set_fg(Some(Color::Green));
            }
        }
        s
    }
}

#[inline]
fn paren(text: &'static str, depth: usize) -> RcDoc<'static, Style> {
    RcDoc::as_string(text).annotate(Style::Paren((depth % 256) as u8))
}

/// Build the document bottom-up with a postfix walk, so deep expressions do not recurse.
fn to_doc(expression: &ExprRef, indent: usize) -> RcDoc<'static, Style> {
    let mut docs: Vec<RcDoc<'static, Style>> = Vec::new();

    traverse_expression(TraversalOrder::Postfix, expression, |node, path| match &**node {
        Expression::Atom(atom) => {
            let style = if path.last() == Some(&0) { Style::Head } else { Style::Atom };
            docs.push(RcDoc::as_string(atom.symbol()).annotate(style));
        }
        Expression::Operator(operator) => {
            let depth = path.len();
            let first = docs.len() - operator.arity();
            let mut children = docs.drain(first..);
            let head = children.next().unwrap_or_else(RcDoc::nil);
            let rest: Vec<_> = children.collect();

            let mut doc = paren("(", depth).append(head);
            if !rest.is_empty() {
                doc = doc.append(
                    RcDoc::line()
                        .append(RcDoc::intersperse(rest, RcDoc::line()))
                        .nest(indent as isize),
                );
            }
            docs.push(doc.append(paren(")", depth)).group());
        }
    });

    docs.pop().unwrap_or_else(RcDoc::nil)
}

// A writer that maps Style annotations to termcolor ColorSpec on a WriteColor sink.
struct ColorWriter<'w, W: WriteColor + Write> {
    out: &'w mut W,
}

impl<'a, 'w, W: WriteColor + Write> RenderAnnotated<'a, Style> for ColorWriter<'w, W> {
    fn push_annotation(&mut self, ann: &'a Style) -> io::Result<()> {
        self.out.set_color(&ann.to_color_spec())
    }
    fn pop_annotation(&mut self) -> io::Result<()> {
        self.out.reset()
    }
}

impl<'w, W: WriteColor + Write> pretty::Render for ColorWriter<'w, W> {
    type Error = io::Error;
    fn write_str(&mut self, s: &str) -> io::Result<usize> {
        self.out.write_all(s.as_bytes())?;
        Ok(s.len())
    }
    fn write_str_all(&mut self, s: &str) -> io::Result<()> {
        self.out.write_all(s.as_bytes())
    }
    fn fail_doc(&self) -> Self::Error {
        io::Error::other("render failed")
    }
}

fn render_to<W: WriteColor + Write>(doc: &RcDoc<'_, Style>, width: usize, out: &mut W) -> io::Result<()> {
    let mut cw = ColorWriter { out };
    doc.render_raw(width, &mut cw)
}

/// Width of the terminal, or `fallback` if it cannot be determined.
fn terminal_width(fallback: usize) -> usize {
    term_size::dimensions().map(|(w, _)| w).unwrap_or(fallback)
}

/// Pretty-printing conveniences for expressions.
pub trait PrettyExpression {
    /// Annotated document, for composing or rendering manually.
    fn pretty_doc(&self, config: &PrettyConfig) -> RcDoc<'static, Style>;

    /// Render with colors to any termcolor writer, laid out for `config.width` and
    /// `config.indent`. The color mode is up to `out`.
    fn pretty_render_to<W: WriteColor + Write>(&self, config: &PrettyConfig, out: &mut W) -> io::Result<()>;

    /// Print to stdout at the terminal width (colors per `config`).
    fn pretty_print_with(&self, config: &PrettyConfig) -> io::Result<()>;

    /// Print to stdout with default settings.
    fn pretty_print(&self) -> io::Result<()> {
        self.pretty_print_with(&PrettyConfig::default())
    }

    /// Plain string (no colors) laid out for `config.width`.
    fn pretty_string_with(&self, config: &PrettyConfig) -> String;

    /// Plain string laid out for 80 columns.
    fn pretty_string(&self) -> String {
        self.pretty_string_with(&PrettyConfig::default())
    }
}

impl PrettyExpression for ExprRef {
    #[inline]
    fn pretty_doc(&self, config: &PrettyConfig) -> RcDoc<'static, Style> {
        to_doc(self, config.indent)
    }

    fn pretty_render_to<W: WriteColor + Write>(&self, config: &PrettyConfig, out: &mut W) -> io::Result<()> {
        render_to(&self.pretty_doc(config), config.width, out)
    }

    fn pretty_print_with(&self, config: &PrettyConfig) -> io::Result<()> {
        let stdout = StandardStream::stdout(config.color.into());
        let mut stdout = stdout.lock();
        let doc = self.pretty_doc(config);
        render_to(&doc, terminal_width(config.width), &mut stdout)?;
        writeln!(stdout)
    }

    fn pretty_string_with(&self, config: &PrettyConfig) -> String {
        let mut buf = String::new();
        // Writing into a String cannot fail.
        self.pretty_doc(config).render_fmt(config.width, &mut buf).ok();
        buf
    }
}
