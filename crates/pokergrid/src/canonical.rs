//! Canonical dataset serialization: `JSON.stringify` output with object keys
//! sorted by locale-aware comparison, then SHA-256.

use pokergrid_core::collate::locale_compare;
use serde_json::Value;

use crate::util;

pub fn canonical_string(value: &Value) -> String {
    let mut out = String::new();
    write_value(value, &mut out);
    out
}

pub fn canonical_sha256_hex(value: &Value) -> String {
    util::sha256_hex(canonical_string(value).as_bytes())
}

fn write_value(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => match n.as_f64() {
            Some(x) => out.push_str(&js_number_string(x)),
            None => out.push_str("null"),
        },
        Value::String(s) => write_string(s, out),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort_by(|a, b| locale_compare(a, b));
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(key, out);
                out.push(':');
                write_value(&map[key.as_str()], out);
            }
            out.push('}');
        }
    }
}

fn write_string(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}

/// ECMAScript `Number::toString` for finite values. Non-finite numbers
/// serialize as `null`, matching `JSON.stringify`.
pub fn js_number_string(x: f64) -> String {
    if !x.is_finite() {
        return "null".to_string();
    }
    if x == 0.0 {
        return "0".to_string();
    }

    let mut buf = ryu::Buffer::new();
    let (digits, n) = decimal_digits(buf.format_finite(x.abs()));
    let k = digits.len() as i32;
    let sign = if x < 0.0 { "-" } else { "" };

    let body = if k <= n && n <= 21 {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{int}.{frac}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        let e = n - 1;
        let exp_sign = if e >= 0 { '+' } else { '-' };
        let (lead, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{lead}e{exp_sign}{}", e.abs())
        } else {
            format!("{lead}.{rest}e{exp_sign}{}", e.abs())
        }
    };
    format!("{sign}{body}")
}

/// Splits a shortest round-trip representation into its significant digits
/// `d1..dk` and the exponent `n` such that the value is `0.d1..dk * 10^n`.
fn decimal_digits(repr: &str) -> (String, i32) {
    let (mantissa, exp) = match repr.split_once(['e', 'E']) {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (repr, 0),
    };
    let int_len = mantissa.find('.').unwrap_or(mantissa.len()) as i32;
    let all: String = mantissa.chars().filter(char::is_ascii_digit).collect();

    let leading = all.len() - all.trim_start_matches('0').len();
    let digits = all.trim_start_matches('0').trim_end_matches('0').to_string();
    (digits, int_len + exp - leading as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_format_like_javascript() {
        let cases: &[(f64, &str)] = &[
            (1.0, "1"),
            (-1.0, "-1"),
            (-0.0, "0"),
            (0.5, "0.5"),
            (1.5, "1.5"),
            (0.1 + 0.2, "0.30000000000000004"),
            (100.0, "100"),
            (123456.789, "123456.789"),
            (1e20, "100000000000000000000"),
            (1e21, "1e+21"),
            (1.5e22, "1.5e+22"),
            (0.000001, "0.000001"),
            (1e-7, "1e-7"),
            (1.23e-18, "1.23e-18"),
            (9007199254740992.0, "9007199254740992"),
            (f64::MAX, "1.7976931348623157e+308"),
            (5e-324, "5e-324"),
        ];
        for (x, want) in cases {
            assert_eq!(js_number_string(*x), *want, "formatting {x:e}");
        }
    }

    #[test]
    fn strings_escape_like_json_stringify() {
        let mut out = String::new();
        write_string("a\"b\\c\n\t\u{1}\u{1f}é\u{7f}", &mut out);
        assert_eq!(out, "\"a\\\"b\\\\c\\n\\t\\u0001\\u001fé\u{7f}\"");
    }

    #[test]
    fn objects_sort_keys_and_drop_whitespace() {
        let v = json!({ "b": [1, 2.5, null], "a": { "z": true, "Y": "s" }, "_": 0 });
        assert_eq!(
            canonical_string(&v),
            r#"{"_":0,"a":{"Y":"s","z":true},"b":[1,2.5,null]}"#
        );
    }

    #[test]
    fn locale_order_differs_from_byte_order() {
        let v = json!({ "b": 1, "B": 2, "a": 3, "A": 4 });
        assert_eq!(canonical_string(&v), r#"{"a":3,"A":4,"b":1,"B":2}"#);
    }

    #[test]
    fn digest_is_stable_across_key_order() {
        let a: Value = serde_json::from_str(r#"{"version":1,"actions":[{"id":"FOLD","label":"Fold"}]}"#)
            .expect("parse a");
        let b: Value = serde_json::from_str(r#"{"actions":[{"label":"Fold","id":"FOLD"}],"version":1}"#)
            .expect("parse b");
        assert_eq!(canonical_sha256_hex(&a), canonical_sha256_hex(&b));
        assert_eq!(
            canonical_sha256_hex(&a),
            util::sha256_hex(br#"{"actions":[{"id":"FOLD","label":"Fold"}],"version":1}"#)
        );
    }

    #[test]
    fn integral_floats_hash_like_integers() {
        let a: Value = serde_json::from_str(r#"{"version":1.0}"#).expect("parse");
        assert_eq!(canonical_string(&a), r#"{"version":1}"#);
    }

    #[test]
    fn full_precision_floats_keep_their_shortest_text() {
        for text in ["0.38595771669529844", "0.9238829120510785", "0.20599677708342345"] {
            let doc: Value =
                serde_json::from_str(&format!(r#"{{"freq":{text}}}"#)).expect("parse");
            assert_eq!(canonical_string(&doc), format!(r#"{{"freq":{text}}}"#));
        }
    }
}
