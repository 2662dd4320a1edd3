//! CPLEX LP text export.

use std::fmt::Write;

use crate::expr::{LinearExpr, ObjectiveSense};
use crate::model::Model;
use crate::variable::Domain;

/// Terms per line before wrapping.
const TERMS_PER_LINE: usize = 8;

/// Renders `model` in CPLEX LP format.
///
/// Sections: objective, `Subject To`, `Bounds` (only finite upper bounds;
/// LP defaults every lower bound to 0), `General`, `Binary`, `End`.
/// A row without terms, such as a grey budget with no grey infrastructure,
/// is written with a zero coefficient on the first variable since LP
/// readers reject a constant left-hand side.
pub fn write_lp(model: &Model) -> String {
    let names: Vec<String> = model.variables().iter().map(|v| v.name()).collect();
    let mut out = String::new();

    match model.objective().sense() {
        ObjectiveSense::Minimize => out.push_str("Minimize\n obj: "),
    }
    out.push_str(&fmt_expr(model.objective().expr(), &names));
    out.push('\n');

    out.push_str("Subject To\n");
    for c in model.constraints() {
        let _ = writeln!(
            out,
            " {}: {} {} {}",
            c.name(),
            fmt_lhs(c.expr(), &names),
            c.sense().as_str(),
            fmt_num(c.rhs())
        );
    }

    out.push_str("Bounds\n");
    for (v, name) in model.variables().iter().zip(&names) {
        if v.domain() == Domain::Binary {
            continue;
        }
        if let Some(upper) = v.upper() {
            let _ = writeln!(out, " {} <= {} <= {}", fmt_num(v.lower()), name, fmt_num(upper));
        }
    }

    out.push_str("General\n");
    for (v, name) in model.variables().iter().zip(&names) {
        if v.domain() == Domain::Integer {
            let _ = writeln!(out, " {name}");
        }
    }

    out.push_str("Binary\n");
    for (v, name) in model.variables().iter().zip(&names) {
        if v.domain() == Domain::Binary {
            let _ = writeln!(out, " {name}");
        }
    }
    out.push_str("End\n");
    out
}

fn fmt_num(v: f64) -> String {
    if (v - v.round()).abs() < 1e-9 {
        format!("{}", v.round() as i64)
    } else {
        format!("{v:.6}")
    }
}

fn fmt_lhs(e: &LinearExpr, names: &[String]) -> String {
    match names.first() {
        Some(first) if e.is_empty() => format!("0 {first}"),
        _ => fmt_expr(e, names),
    }
}

fn fmt_expr(e: &LinearExpr, names: &[String]) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(e.len());
    for (var, c) in e.terms() {
        let name = &names[var.index()];
        let part = if (c - 1.0).abs() < 1e-12 {
            format!("+ {name}")
        } else if (c + 1.0).abs() < 1e-12 {
            format!("- {name}")
        } else if c < 0.0 {
            format!("- {} {name}", fmt_num(-c))
        } else {
            format!("+ {} {name}", fmt_num(c))
        };
        parts.push(part);
    }
    if parts.is_empty() {
        return "0".to_string();
    }
    parts
        .chunks(TERMS_PER_LINE)
        .map(|chunk| chunk.join(" "))
        .collect::<Vec<_>>()
        .join("\n   ")
}
