//! Client-side parameter binding
//!
//! Administrative statements (`SHOW ... LIKE ?`, `SET GLOBAL x = ?`,
//! `CHANGE MASTER TO ...`) cannot all be prepared server-side, so `?`
//! placeholders are replaced with escaped literals before the text is sent.

use sqlfleet_core::{FleetError, Result, Value};

/// Escape a value for SQL literal inclusion
pub fn value_to_mysql_literal(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(v) => if *v { "TRUE" } else { "FALSE" }.to_string(),
        Value::Int64(v) => v.to_string(),
        Value::UInt64(v) => v.to_string(),
        Value::Float64(v) => v.to_string(),
        Value::String(v) => format!("'{}'", v.replace('\\', "\\\\").replace('\'', "''")),
        Value::Bytes(v) => {
            let hex: String = v.iter().map(|b| format!("{:02x}", b)).collect();
            format!("X'{}'", hex)
        }
    }
}

/// Replace each `?` outside quoted text with the next parameter.
///
/// The number of placeholders must equal the number of parameters.
pub fn interpolate(sql: &str, params: &[Value]) -> Result<String> {
    if params.is_empty() {
        return Ok(sql.to_string());
    }

    let mut out = String::with_capacity(sql.len() + params.len() * 8);
    let mut params_iter = params.iter();
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in sql.chars() {
        match quote {
            Some(q) => {
                if escaped {
                    escaped = false;
                } else if c == '\\' && q != '`' {
                    escaped = true;
                } else if c == q {
                    quote = None;
                }
                out.push(c);
            }
            None => match c {
                '\'' | '"' | '`' => {
                    quote = Some(c);
                    out.push(c);
                }
                '?' => {
                    let value = params_iter.next().ok_or_else(|| {
                        FleetError::Query(format!(
                            "statement has more placeholders than the {} parameters given",
                            params.len()
                        ))
                    })?;
                    out.push_str(&value_to_mysql_literal(value));
                }
                _ => out.push(c),
            },
        }
    }

    let unused = params_iter.count();
    if unused > 0 {
        return Err(FleetError::Query(format!(
            "{unused} parameters left without a placeholder"
        )));
    }
    Ok(out)
}
