use std::io;

use serde::Serialize;
use serde_json::{Value, json};
use spendlens_core::{CoreError, SuccessEnvelope};

const JSON_VERSION: &str = "v1";

pub fn render_success_json(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command.as_str() {
        "report" | "preview" | "rules" => serialize_json_pretty(&json!({
            "ok": true,
            "version": JSON_VERSION,
            "data": success.data.clone(),
        })),
        _ => Err(io::Error::other(format!(
            "JSON output is not supported for command `{}`",
            success.command
        ))),
    }
}

pub fn render_error_json(error: &CoreError) -> io::Result<String> {
    let mut body = json!({
        "code": error.code,
        "message": error.message,
        "recovery_steps": error.recovery_steps,
    });
    if let (Some(object), Some(data)) = (body.as_object_mut(), &error.data) {
        object.insert("data".to_string(), data.clone());
    }

    serialize_json_pretty(&json!({ "error": body }))
}

fn serialize_json_pretty<T>(value: &T) -> io::Result<String>
where
    T: Serialize,
{
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};
    use spendlens_core::{CoreError, SuccessEnvelope};

    use super::{render_error_json, render_success_json};

    fn success(command: &str, data: Value) -> SuccessEnvelope {
        SuccessEnvelope {
            ok: true,
            command: command.to_string(),
            version: "0.1.0".to_string(),
            data,
        }
    }

    #[test]
    fn report_json_uses_structured_envelope() {
        let payload = success(
            "report",
            json!({
                "encoding": "utf-8",
                "report": { "total_amount": 180.0 }
            }),
        );

        let rendered = render_success_json(&payload);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            let parsed: Result<Value, _> = serde_json::from_str(&text);
            assert!(parsed.is_ok());
            if let Ok(value) = parsed {
                assert_eq!(value["ok"], Value::Bool(true));
                assert_eq!(value["version"], Value::String("v1".to_string()));
                assert_eq!(value["data"]["report"]["total_amount"], 180.0);
            }
        }
    }

    #[test]
    fn unknown_command_is_rejected() {
        let payload = success("dashboard", json!({}));
        assert!(render_success_json(&payload).is_err());
    }

    #[test]
    fn runtime_error_json_uses_universal_shape() {
        let error = CoreError::empty_result(3, 3);
        let rendered = render_error_json(&error);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            let parsed: Result<Value, _> = serde_json::from_str(&text);
            assert!(parsed.is_ok());
            if let Ok(value) = parsed {
                assert_eq!(
                    value["error"]["code"],
                    Value::String("empty_result".to_string())
                );
                assert_eq!(value["error"]["data"]["rows_read"], 3);
                assert!(value.get("ok").is_none());
            }
        }
    }

    #[test]
    fn error_json_omits_data_when_absent() {
        let error = CoreError::invalid_argument("no input");
        let rendered = render_error_json(&error);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            let parsed: Result<Value, _> = serde_json::from_str(&text);
            assert!(parsed.is_ok());
            if let Ok(value) = parsed {
                assert!(value["error"].get("data").is_none());
            }
        }
    }
}
