use std::path::Path;

use serde::Serialize;

use crate::{
    app::GlobalOptions,
    commands::common::{file_display_name, load_resolver, mapping_path},
    output::print_output,
};

#[derive(Debug, Serialize)]
struct MappingInfo {
    mapping: String,
    type_count: usize,
    method_count: usize,
    overloaded_method_count: usize,
    alternative_count: usize,
    filter_generated: bool,
    hook_logs: bool,
}

pub fn run(mapping: Option<&Path>, opts: &GlobalOptions) -> anyhow::Result<()> {
    let (resolver, config) = load_resolver(mapping, opts)?;
    let table = resolver.snapshot()?;
    let path = mapping_path(mapping, &config)?;

    let info = MappingInfo {
        mapping: file_display_name(&path),
        type_count: table.type_count(),
        method_count: table.method_count(),
        overloaded_method_count: table.overloaded_method_count(),
        alternative_count: table
            .methods()
            .map(|signature| signature.alternatives.len())
            .sum(),
        filter_generated: config.filter_generated,
        hook_logs: config.hook_logs,
    };

    print_output(&info, opts, |info| {
        let yes_no = |flag: bool| if flag { "yes" } else { "no" };
        println!("Mapping:           {}", info.mapping);
        println!("Types:             {}", info.type_count);
        println!("Methods:           {}", info.method_count);
        println!("Overloaded:        {}", info.overloaded_method_count);
        println!("Alternatives:      {}", info.alternative_count);
        println!("Filter generated:  {}", yes_no(info.filter_generated));
        println!("Hook logs:         {}", yes_no(info.hook_logs));
    })
}
