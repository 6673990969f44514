use std::path::Path;

use anyhow::bail;
use serde::Serialize;
use symresolve::{mapping::name, tokens, MappingTable};

use crate::{
    app::GlobalOptions,
    commands::common::load_resolver,
    output::{print_output, Align, TabWriter},
};

#[derive(Debug, Serialize)]
struct Alternative {
    original: String,
    obfuscated_parameters: String,
}

#[derive(Debug, Serialize)]
struct LookupOutput {
    name: String,
    kind: &'static str,
    original: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    alternatives: Vec<Alternative>,
}

/// Type names first, then method names in either notation, then any embedded type tokens.
fn lookup(table: &MappingTable, query: &str) -> Option<LookupOutput> {
    if let Some(original) = table.original_type_name(query) {
        return Some(LookupOutput {
            name: query.to_string(),
            kind: "type",
            original: original.to_string(),
            alternatives: Vec::new(),
        });
    }

    if let Some(original) = table.resolve_method_name(query) {
        let key = if query.contains(':') {
            query.to_string()
        } else {
            name::to_colon_form(query).into_owned()
        };
        let alternatives = table
            .method(&key)
            .map(|signature| {
                signature
                    .alternatives
                    .iter()
                    .map(|overload| Alternative {
                        original: format!(
                            "{}{}",
                            name::to_dot_form(&overload.old_declaring_and_method),
                            overload.old_parameters
                        ),
                        obfuscated_parameters: overload.new_parameters.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        return Some(LookupOutput {
            name: query.to_string(),
            kind: "method",
            original,
            alternatives,
        });
    }

    let resolved = tokens::resolve_type_tokens(query, table);
    if resolved != query {
        return Some(LookupOutput {
            name: query.to_string(),
            kind: "text",
            original: resolved.into_owned(),
            alternatives: Vec::new(),
        });
    }

    None
}

pub fn run(mapping: Option<&Path>, query: &str, opts: &GlobalOptions) -> anyhow::Result<()> {
    let (resolver, _) = load_resolver(mapping, opts)?;
    let table = resolver.snapshot()?;

    let Some(output) = lookup(&table, query) else {
        let unknown: Vec<&str> = tokens::type_tokens(query).collect();
        if unknown.is_empty() {
            bail!("no mapping entry for '{query}'");
        }
        bail!(
            "no mapping entry for '{query}' (unknown tokens: {})",
            unknown.join(", ")
        );
    };

    print_output(&output, opts, |out| {
        println!("{} ({}) -> {}", out.name, out.kind, out.original);
        if out.alternatives.len() > 1 {
            println!("\nOverloads:");
            let mut tw = TabWriter::new(vec![
                ("Original", Align::Left),
                ("Obfuscated params", Align::Left),
            ])
            .indent("  ");
            for alternative in &out.alternatives {
                tw.row(vec![
                    alternative.original.clone(),
                    alternative.obfuscated_parameters.clone(),
                ]);
            }
            tw.print();
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAPPING: &str = r#"<mapping><assembly>
        <type fullName="Game.Player" newFullName="$A">
            <method oldStackTraceSignature="Game.Player:TakeDamage(int)" newStackTraceSignature="$A:$d(int)" />
            <method oldStackTraceSignature="Game.Player:TakeDamage(Game.Player)" newStackTraceSignature="$A:$d($A)" />
            <method oldStackTraceSignature="Game.Player:.ctor()" newStackTraceSignature="$A:.ctor()" />
        </type>
    </assembly></mapping>"#;

    fn table() -> MappingTable {
        MappingTable::from_xml(MAPPING).unwrap()
    }

    #[test]
    fn type_name() {
        let found = lookup(&table(), "$A").unwrap();
        assert_eq!(found.kind, "type");
        assert_eq!(found.original, "Game.Player");
    }

    #[test]
    fn method_name_lists_overloads() {
        let found = lookup(&table(), "$A.$d").unwrap();
        assert_eq!(found.kind, "method");
        assert_eq!(found.original, "Game.Player.TakeDamage");
        assert_eq!(found.alternatives.len(), 2);
        assert_eq!(found.alternatives[1].original, "Game.Player.TakeDamage(Game.Player)");
        assert_eq!(found.alternatives[1].obfuscated_parameters, "($A)");
    }

    #[test]
    fn constructor_in_either_notation() {
        assert_eq!(
            lookup(&table(), "$A..ctor").unwrap().original,
            "Game.Player..ctor"
        );
        assert_eq!(
            lookup(&table(), "$A:.ctor").unwrap().original,
            "Game.Player..ctor"
        );
    }

    #[test]
    fn embedded_tokens_and_unknown_names() {
        let found = lookup(&table(), "List<$A>").unwrap();
        assert_eq!(found.kind, "text");
        assert_eq!(found.original, "List<Game.Player>");
        assert!(lookup(&table(), "$Z").is_none());
    }
}
