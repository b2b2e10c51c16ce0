use spendlens_core::CoreError;

pub fn render_error(error: &CoreError) -> String {
    let mut lines = vec![
        format!("Error ({}): {}", error.code, error.message),
        String::new(),
        "Try this:".to_string(),
    ];

    if error.recovery_steps.is_empty() {
        lines.push("  - Retry the command.".to_string());
    } else {
        for step in &error.recovery_steps {
            lines.push(format!("  - {step}"));
        }
    }

    lines.join("\n")
}
