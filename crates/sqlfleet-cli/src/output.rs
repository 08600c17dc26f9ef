//! Terminal output: tables for people, JSON for scripts

use comfy_table::{Table, presets::UTF8_FULL};
use serde::Serialize;

#[derive(Debug, Clone, Copy)]
pub struct OutputContext {
    pub json: bool,
}

impl OutputContext {
    /// Print `value` as pretty JSON
    pub fn print_json<T: Serialize>(&self, value: &T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Print rows under a header
    pub fn print_table(&self, header: &[&str], rows: Vec<Vec<String>>) {
        println!("{}", render_table(header, rows));
    }

    /// Print a two-column key/value table
    pub fn print_pairs<K, V>(&self, pairs: impl IntoIterator<Item = (K, V)>)
    where
        K: ToString,
        V: ToString,
    {
        let rows = pairs
            .into_iter()
            .map(|(k, v)| vec![k.to_string(), v.to_string()])
            .collect();
        self.print_table(&["Name", "Value"], rows);
    }

    /// Print the serialized value in JSON mode, otherwise run `human`
    pub fn emit<T: Serialize>(&self, value: &T, human: impl FnOnce(&Self)) -> anyhow::Result<()> {
        if self.json {
            self.print_json(value)
        } else {
            human(self);
            Ok(())
        }
    }
}

fn render_table(header: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(header.to_vec());
    for row in rows {
        table.add_row(row);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_table() {
        let table = render_table(
            &["Slave", "Health"],
            vec![vec!["10.0.0.2:3306".to_string(), "Healthy".to_string()]],
        );
        let rendered = table.to_string();
        assert!(rendered.contains("Slave"));
        assert!(rendered.contains("10.0.0.2:3306"));
        assert!(rendered.contains("Healthy"));
    }
}
