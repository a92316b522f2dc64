#![cfg(target_arch = "wasm32")]

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Node};

const STYLE_TAG_SELECTOR: &str = "style[data-amr-ui]";

/// Default CSS for the dashboard along with easy-to-override design tokens.
pub const DEFAULT_STYLES: &str = r#"
:root {
  --amr-font-family: 'Inter', system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
  --amr-bg: #f8fafc;
  --amr-card-bg: #ffffff;
  --amr-card-border: rgba(148, 163, 184, 0.28);
  --amr-radius: 14px;
  --amr-text: #1f2933;
  --amr-muted: #52606d;
  --amr-heading: #11181c;
  --amr-accent: #1a73e8;
  --amr-danger: #b42318;
  --amr-danger-bg: rgba(180, 35, 24, 0.1);
}

.amr-root {
  font-family: var(--amr-font-family);
  background: var(--amr-bg);
  color: var(--amr-text);
  display: flex;
  flex-direction: column;
  gap: 20px;
  padding: 24px;
}

.amr-header h1 {
  margin: 0;
  color: var(--amr-heading);
  font-size: 1.6rem;
}

.amr-header h1.amr-error {
  color: var(--amr-danger);
  background: var(--amr-danger-bg);
  border-radius: var(--amr-radius);
  padding: 12px 16px;
}

.amr-loading {
  color: var(--amr-muted);
}

.amr-filters {
  display: flex;
  flex-wrap: wrap;
  align-items: flex-end;
  gap: 16px;
}

.amr-filter {
  display: flex;
  flex-direction: column;
  gap: 6px;
  font-size: 0.85rem;
  color: var(--amr-muted);
}

.amr-filter select {
  min-width: 180px;
  padding: 8px 10px;
  border: 1px solid var(--amr-card-border);
  border-radius: 8px;
  background: var(--amr-card-bg);
  color: var(--amr-text);
}

.amr-reset {
  padding: 8px 16px;
  border: 1px solid var(--amr-accent);
  border-radius: 8px;
  background: transparent;
  color: var(--amr-accent);
  font-weight: 600;
  cursor: pointer;
}

.amr-kpis {
  display: grid;
  grid-template-columns: repeat(3, minmax(160px, 1fr));
  gap: 16px;
}

.amr-kpi {
  background: var(--amr-card-bg);
  border: 1px solid var(--amr-card-border);
  border-radius: var(--amr-radius);
  padding: 16px 20px;
}

.amr-kpi-label {
  display: block;
  font-size: 0.8rem;
  color: var(--amr-muted);
  text-transform: uppercase;
  letter-spacing: 0.04em;
}

.amr-kpi-value {
  display: block;
  margin-top: 6px;
  font-size: 1.8rem;
  font-weight: 700;
  font-variant-numeric: tabular-nums;
  color: var(--amr-heading);
}

.amr-charts {
  display: grid;
  grid-template-columns: repeat(2, minmax(320px, 1fr));
  gap: 20px;
}

.amr-chart {
  background: var(--amr-card-bg);
  border: 1px solid var(--amr-card-border);
  border-radius: var(--amr-radius);
  padding: 12px;
  min-height: 360px;
}

.amr-chart.is-wide {
  grid-column: 1 / -1;
}

@media (max-width: 860px) {
  .amr-kpis,
  .amr-charts {
    grid-template-columns: 1fr;
  }
}
"#;

pub fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if document.query_selector(STYLE_TAG_SELECTOR)?.is_some() {
        return Ok(());
    }

    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("Document không có thẻ <head>"))?;

    let style_el = document.create_element("style")?;
    style_el.set_attribute("data-amr-ui", "v1")?;
    style_el.set_text_content(Some(DEFAULT_STYLES));
    head.append_child(&style_el.clone().dyn_into::<Node>()?)?;

    Ok(())
}
