use serde::Serialize;

/// Render a serializable response as JSON.
pub fn render<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    if pretty {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(serde_json::to_string(value)?)
    }
}

/// Print a serializable response as JSON on stdout.
pub fn output<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let rendered = render(value, pretty)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_and_pretty_json() {
        let value = serde_json::json!({ "kind": "define", "name": "MACRO1" });
        assert_eq!(
            render(&value, false).unwrap(),
            r#"{"kind":"define","name":"MACRO1"}"#
        );
        assert!(render(&value, true).unwrap().contains("\n  \"kind\": \"define\""));
    }
}
