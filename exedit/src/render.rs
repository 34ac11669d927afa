//! Terminal output.
//!
//! Everything here returns strings so commands decide where to print them.

use colored::Colorize;
use explodeconf::{FormEntry, GroupKind, Node, NodePath, Scalar};

/// One row of the group listing.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupRow {
    pub name: String,
    pub kind: GroupKind,
    /// Paired entity or block group, if any.
    pub partner: Option<String>,
    pub items: usize,
}

/// Format a group row, colored by kind.
pub fn group_line(row: &GroupRow) -> String {
    let count = format!("({} item(s))", row.items).dimmed();
    match row.kind {
        GroupKind::Entity => format!(
            "{} {} -> {} {count}",
            "entity".green().bold(),
            row.name.green(),
            row.partner.as_deref().unwrap_or("?")
        ),
        GroupKind::Block => format!(
            "{}  {} <- {} {count}",
            "block".yellow().bold(),
            row.name.yellow(),
            row.partner.as_deref().unwrap_or("?")
        ),
        GroupKind::Unclassified => format!(
            "{} {} {count}",
            "orphan".red().bold(),
            row.name.red()
        ),
    }
}

fn scalar_text(value: &Scalar) -> String {
    match value {
        Scalar::String(s) => s.clone(),
        Scalar::Boolean(_) => value.to_string().cyan().to_string(),
        Scalar::Null => value.to_string().dimmed().to_string(),
        _ => value.to_string().blue().to_string(),
    }
}

/// Format a flattened form as indented lines under a header.
///
/// Fields with known help get its summary line as a trailing comment. With
/// `details` the full help text follows each field instead.
pub fn form_lines(section: &NodePath, entries: &[FormEntry], details: bool) -> Vec<String> {
    let mut lines = vec![format!("{}", section.to_string().bold().purple())];
    let mut depth = 1;
    for entry in entries {
        let indent = "  ".repeat(depth);
        match entry {
            FormEntry::SectionStart { title, .. } => {
                lines.push(format!("{indent}{}", format!("[{title}]").bold()));
                depth += 1;
            }
            FormEntry::Field { value, .. } => {
                let label = entry.label().unwrap_or_default();
                let field = format!("{indent}{label} = {}", scalar_text(value));
                if details {
                    lines.push(field);
                    let help = entry
                        .help()
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("no help available for `{label}`"));
                    lines.extend(help.lines().map(|l| format!("{indent}  {}", l.dimmed())));
                } else if let Some(summary) = entry.help().and_then(|h| h.lines().next()) {
                    lines.push(format!("{field}  {}", format!("# {summary}").dimmed()));
                } else {
                    lines.push(field);
                }
            }
            FormEntry::SectionEnd => depth = depth.saturating_sub(1).max(1),
        }
    }
    lines
}

/// Text for a looked-up node: scalars as typed text, subtrees as YAML.
pub fn node_text(node: &Node) -> anyhow::Result<String> {
    Ok(match node {
        Node::Scalar(value) => value.to_string(),
        _ => explodeconf::DocumentFormat::Yaml
            .render(node)?
            .trim_end()
            .to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_group_lines() {
        plain();
        let row = GroupRow {
            name: "E1".to_string(),
            kind: GroupKind::Entity,
            partner: Some("B1".to_string()),
            items: 2,
        };
        assert_eq!(group_line(&row), "entity E1 -> B1 (2 item(s))");

        let orphan = GroupRow {
            name: "G3".to_string(),
            kind: GroupKind::Unclassified,
            partner: None,
            items: 0,
        };
        assert_eq!(group_line(&orphan), "orphan G3 (0 item(s))");
    }

    #[test]
    fn test_form_lines_indent_sections() {
        plain();
        let doc = explodeconf::Document::from_yaml(
            "P:\n  Radius: 2.0\n  Sound:\n    Name: ENTITY_OCELOT_HURT\n",
        )
        .unwrap();
        let entries = doc.form("P").unwrap();
        let lines = form_lines(&NodePath::parse("P"), &entries, false);
        assert_eq!(
            lines,
            [
                "P",
                "  Radius = 2.0",
                "  [Sound]",
                "    Name = ENTITY_OCELOT_HURT  # Spigot Sound identifier to play."
            ]
        );
    }

    #[test]
    fn test_form_lines_with_details() {
        plain();
        let doc = explodeconf::Document::from_yaml("P:\n  Radius: 2.0\n  Speed: 1.0\n").unwrap();
        let entries = doc.form("P").unwrap();
        let lines = form_lines(&NodePath::parse("P"), &entries, true);
        assert_eq!(
            lines,
            [
                "P",
                "  Radius = 2.0",
                "    no help available for `Radius`",
                "  Speed = 1.0",
                "    Particle speed.",
                "    Default 1.0. Must not be negative."
            ]
        );
    }

    #[test]
    fn test_node_text() {
        assert_eq!(node_text(&Node::from(50.0)).unwrap(), "50.0");
        let list = Node::Sequence(vec!["a".into(), "b".into()]);
        assert_eq!(node_text(&list).unwrap(), "- a\n- b");
    }
}
