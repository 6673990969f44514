use std::{collections::HashMap, path::Path};

use serde::Serialize;
use symresolve::{mapping::name::split_colon_form, MappingTable};

use crate::{
    app::GlobalOptions,
    commands::common::load_resolver,
    output::{print_output, Align, TabWriter},
};

#[derive(Debug, Serialize)]
struct TypeEntry {
    obfuscated: String,
    original: String,
    methods: usize,
}

#[derive(Debug, Serialize)]
struct TypesOutput {
    types: Vec<TypeEntry>,
    count: usize,
}

/// Type pairs matching `filter`, sorted by original name, with their obfuscated method counts.
fn collect_types(table: &MappingTable, filter: Option<&str>) -> Vec<TypeEntry> {
    let mut method_counts: HashMap<&str, usize> = HashMap::new();
    for signature in table.methods() {
        let (declaring_type, _) = split_colon_form(&signature.new_declaring_and_method);
        *method_counts.entry(declaring_type).or_default() += 1;
    }

    let mut entries: Vec<TypeEntry> = table
        .types()
        .filter(|(obfuscated, original)| {
            filter.map_or(true, |text| obfuscated.contains(text) || original.contains(text))
        })
        .map(|(obfuscated, original)| TypeEntry {
            obfuscated: obfuscated.to_string(),
            original: original.to_string(),
            methods: method_counts.get(obfuscated).copied().unwrap_or(0),
        })
        .collect();
    entries.sort_by(|a, b| a.original.cmp(&b.original));
    entries
}

pub fn run(mapping: Option<&Path>, filter: Option<&str>, opts: &GlobalOptions) -> anyhow::Result<()> {
    let (resolver, _) = load_resolver(mapping, opts)?;
    let table = resolver.snapshot()?;

    let entries = collect_types(&table, filter);
    let count = entries.len();
    let output = TypesOutput {
        types: entries,
        count,
    };

    print_output(&output, opts, |out| {
        let mut tw = TabWriter::new(vec![
            ("Obfuscated", Align::Left),
            ("Original", Align::Left),
            ("Methods", Align::Right),
        ]);
        for entry in &out.types {
            tw.row(vec![
                entry.obfuscated.clone(),
                entry.original.clone(),
                entry.methods.to_string(),
            ]);
        }
        tw.print();
        println!("\n{} types", out.count);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAPPING: &str = r#"<mapping><assembly>
        <type fullName="Game.Player" newFullName="$A">
            <method oldStackTraceSignature="Game.Player:Update()" newStackTraceSignature="$A:$m()" />
            <method oldStackTraceSignature="Game.Player:Move(int)" newStackTraceSignature="$A:$v(int)" />
            <method oldStackTraceSignature="Game.Player:Move(float)" newStackTraceSignature="$A:$v(float)" />
        </type>
        <type fullName="Game.Combat.Weapon" newFullName="$C.$W" />
    </assembly></mapping>"#;

    #[test]
    fn method_counts_per_type() {
        let table = MappingTable::from_xml(MAPPING).unwrap();
        let entries = collect_types(&table, None);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].original, "Game.Combat.Weapon");
        assert_eq!(entries[0].methods, 0);
        assert_eq!(entries[1].obfuscated, "$A");
        assert_eq!(entries[1].methods, 2);
    }

    #[test]
    fn filter_matches_either_name() {
        let table = MappingTable::from_xml(MAPPING).unwrap();
        assert_eq!(collect_types(&table, Some("Combat"))[0].obfuscated, "$C.$W");
        assert_eq!(collect_types(&table, Some("$A"))[0].original, "Game.Player");
        assert!(collect_types(&table, Some("Enemy")).is_empty());
    }
}
