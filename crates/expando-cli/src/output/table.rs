//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};
use expando::ExpansionMap;

/// Format bindings, sorted by name, as an ASCII table.
pub fn format_bindings_table(bindings: &ExpansionMap) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Expansion"]);

    for (name, expansion) in bindings.sorted() {
        table.add_row(vec![name, expansion]);
    }

    table
}
