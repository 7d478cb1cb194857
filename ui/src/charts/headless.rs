//! In-memory chart backend and page, used on the host target and in tests.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

use super::{ChartBackend, ChartConfig, ChartKind, PageHost};
use crate::metrics::RenderError;

/// What a headless "chart" remembers: its current configuration and how many
/// times it was redrawn after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessChart {
    pub id: u64,
    pub canvas_id: String,
    pub config: ChartConfig,
    pub redraws: u32,
}

impl HeadlessChart {
    pub fn kind(&self) -> ChartKind {
        self.config.kind
    }

    pub fn labels(&self) -> &[String] {
        &self.config.dataset.labels
    }

    pub fn values(&self) -> &[f64] {
        &self.config.dataset.values
    }

    pub fn tooltip(&self, index: usize) -> Option<String> {
        self.config.tooltip_label(index)
    }
}

#[derive(Debug, Default)]
pub struct HeadlessBackend {
    next_id: u64,
    created: u32,
    destroyed: u32,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn created(&self) -> u32 {
        self.created
    }

    pub fn destroyed(&self) -> u32 {
        self.destroyed
    }
}

impl ChartBackend for HeadlessBackend {
    type Chart = HeadlessChart;

    fn create(&mut self, canvas_id: &str, config: &ChartConfig) -> Result<HeadlessChart, RenderError> {
        self.next_id += 1;
        self.created += 1;
        Ok(HeadlessChart {
            id: self.next_id,
            canvas_id: canvas_id.to_string(),
            config: config.clone(),
            redraws: 0,
        })
    }

    fn replace_dataset(
        &mut self,
        chart: &mut HeadlessChart,
        config: &ChartConfig,
    ) -> Result<(), RenderError> {
        chart.config.dataset = config.dataset.clone();
        chart.redraws += 1;
        Ok(())
    }

    fn destroy(&mut self, _chart: HeadlessChart) {
        self.destroyed += 1;
    }
}

/// A page made of element ids and their `data-*` attributes.
#[derive(Debug, Default)]
pub struct StaticPage {
    elements: BTreeMap<String, BTreeMap<String, String>>,
    texts: RefCell<BTreeMap<String, String>>,
    hidden: RefCell<BTreeSet<String>>,
    revealed: RefCell<BTreeSet<String>>,
}

impl StaticPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_element(mut self, id: &str) -> Self {
        self.elements.entry(id.to_string()).or_default();
        self
    }

    /// Adds the element if needed and sets `data-<name>`.
    pub fn with_data(mut self, id: &str, name: &str, value: &str) -> Self {
        self.elements
            .entry(id.to_string())
            .or_default()
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn text(&self, id: &str) -> Option<String> {
        self.texts.borrow().get(id).cloned()
    }

    pub fn is_hidden(&self, id: &str) -> bool {
        self.hidden.borrow().contains(id)
    }

    pub fn is_revealed(&self, id: &str) -> bool {
        self.revealed.borrow().contains(id)
    }
}

impl PageHost for StaticPage {
    fn has_element(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    fn data_attribute(&self, id: &str, name: &str) -> Option<String> {
        self.elements.get(id)?.get(name).cloned()
    }

    fn show_fallback_table(&self, chart_id: &str, table_id: &str) {
        self.hidden.borrow_mut().insert(chart_id.to_string());
        if self.has_element(table_id) {
            self.revealed.borrow_mut().insert(table_id.to_string());
        }
    }

    fn set_text(&self, id: &str, text: &str) {
        self.texts
            .borrow_mut()
            .insert(id.to_string(), text.to_string());
    }
}
