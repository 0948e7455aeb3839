use crate::settings::WidgetSettings;
use crate::ui::style as ui;
use std::path::Path;

pub fn render_settings(settings: &WidgetSettings, settings_path: &Path) -> String {
    let endpoint = if settings.endpoint.trim().is_empty() {
        ui::dim("(not set)")
    } else {
        ui::url(&settings.endpoint)
    };
    let credential = if settings.credential.trim().is_empty() {
        ui::dim("(none)")
    } else {
        ui::value(settings.masked_credential())
    };

    let lines = [
        format!("◆ {}", ui::header("sidefetch settings")),
        String::new(),
        format!("  {}  {endpoint}", ui::cyan("endpoint  ")),
        format!("  {}  {}", ui::cyan("method    "), ui::value(&settings.method)),
        format!("  {}  {credential}", ui::cyan("credential")),
        String::new(),
        format!("  {}", ui::dim(settings_path.display())),
    ];
    lines.join("\n")
}
