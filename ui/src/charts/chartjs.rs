//! [`ChartBackend`] over the page's Chart.js.

use js_sys::{Array, Object, Reflect, JSON};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

use super::{ChartBackend, ChartConfig, TooltipFormat};
use crate::core::format;
use crate::metrics::RenderError;

mod ffi {
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    #[wasm_bindgen]
    extern "C" {
        pub type Chart;

        #[wasm_bindgen(constructor, catch)]
        pub fn new(canvas: &HtmlCanvasElement, config: &JsValue) -> Result<Chart, JsValue>;

        #[wasm_bindgen(method, getter)]
        pub fn data(this: &Chart) -> JsValue;

        #[wasm_bindgen(method)]
        pub fn update(this: &Chart);

        #[wasm_bindgen(method)]
        pub fn destroy(this: &Chart);
    }
}

type LabelCallback = Closure<dyn Fn(JsValue) -> JsValue>;

/// A Chart.js instance plus the tooltip callback it calls back into.
pub struct ChartJsChart {
    chart: ffi::Chart,
    _label: LabelCallback,
}

#[derive(Debug, Default)]
pub struct ChartJsBackend;

fn backend_error(err: JsValue) -> RenderError {
    RenderError::Backend(format!("{err:?}"))
}

fn to_js(value: &serde_json::Value) -> Result<JsValue, RenderError> {
    JSON::parse(&value.to_string()).map_err(backend_error)
}

/// `parent[key]`, created as `{}` when missing.
fn child(parent: &JsValue, key: &str) -> Result<JsValue, RenderError> {
    let key = JsValue::from_str(key);
    let existing = Reflect::get(parent, &key).map_err(backend_error)?;
    if existing.is_object() {
        return Ok(existing);
    }
    let fresh: JsValue = Object::new().into();
    Reflect::set(parent, &key, &fresh).map_err(backend_error)?;
    Ok(fresh)
}

fn number(value: &JsValue) -> f64 {
    value.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Tooltip label callback reading the live dataset, so it stays correct
/// after in-place updates.
fn label_callback(tooltip: TooltipFormat) -> LabelCallback {
    Closure::new(move |context: JsValue| {
        let field = |name: &str| Reflect::get(&context, &JsValue::from_str(name)).unwrap_or(JsValue::UNDEFINED);
        let raw = number(&field("raw"));
        let text = match tooltip {
            TooltipFormat::Unit(unit) => format::unit_label(unit, raw),
            TooltipFormat::Impact => format::impact_label(raw),
            TooltipFormat::Proportional => {
                let label = field("label").as_string().unwrap_or_default();
                let data: Vec<f64> = Reflect::get(&field("dataset"), &JsValue::from_str("data"))
                    .ok()
                    .filter(|data| Array::is_array(data))
                    .map(|data| Array::from(&data).iter().map(|v| number(&v)).collect())
                    .unwrap_or_default();
                format::proportion_label(&label, raw, &data)
            }
        };
        JsValue::from_str(&text)
    })
}

impl ChartBackend for ChartJsBackend {
    type Chart = ChartJsChart;

    fn create(&mut self, canvas_id: &str, config: &ChartConfig) -> Result<ChartJsChart, RenderError> {
        let canvas = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(canvas_id))
            .ok_or_else(|| RenderError::MissingElement(canvas_id.to_string()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| RenderError::Backend(format!("#{canvas_id} is not a canvas")))?;

        let js_config = to_js(&config.to_chartjs())?;
        let label = label_callback(config.tooltip);
        let options = child(&js_config, "options")?;
        let plugins = child(&options, "plugins")?;
        let tooltip = child(&plugins, "tooltip")?;
        let callbacks = child(&tooltip, "callbacks")?;
        Reflect::set(&callbacks, &JsValue::from_str("label"), label.as_ref())
            .map_err(backend_error)?;

        let chart = ffi::Chart::new(&canvas, &js_config).map_err(backend_error)?;
        Ok(ChartJsChart {
            chart,
            _label: label,
        })
    }

    fn replace_dataset(
        &mut self,
        chart: &mut ChartJsChart,
        config: &ChartConfig,
    ) -> Result<(), RenderError> {
        let data = chart.chart.data();
        let labels = to_js(&serde_json::json!(config.dataset.labels))?;
        Reflect::set(&data, &JsValue::from_str("labels"), &labels).map_err(backend_error)?;

        let datasets = Reflect::get(&data, &JsValue::from_str("datasets")).map_err(backend_error)?;
        let current = Array::from(&datasets).get(0);
        if !current.is_object() {
            return Err(RenderError::Backend("chart has no dataset".into()));
        }
        let fresh = to_js(&config.dataset_json())?;
        for key in ["data", "backgroundColor", "borderColor"] {
            let key = JsValue::from_str(key);
            let value = Reflect::get(&fresh, &key).map_err(backend_error)?;
            Reflect::set(&current, &key, &value).map_err(backend_error)?;
        }

        chart.chart.update();
        Ok(())
    }

    fn destroy(&mut self, chart: ChartJsChart) {
        chart.chart.destroy();
    }
}
