//! Live charts keyed by role. The page controller owns one registry and
//! hands it to the renderer and the refresh loop; nothing else holds chart
//! objects.

use std::collections::BTreeMap;

use super::ChartRole;

/// A live chart bound to a canvas. `raw` is the backend's chart object.
#[derive(Debug)]
pub struct ChartHandle<H> {
    role: ChartRole,
    canvas_id: String,
    raw: H,
}

impl<H> ChartHandle<H> {
    pub fn new(role: ChartRole, canvas_id: impl Into<String>, raw: H) -> Self {
        Self {
            role,
            canvas_id: canvas_id.into(),
            raw,
        }
    }

    pub fn role(&self) -> ChartRole {
        self.role
    }

    pub fn canvas_id(&self) -> &str {
        &self.canvas_id
    }

    pub fn raw(&self) -> &H {
        &self.raw
    }

    pub fn raw_mut(&mut self) -> &mut H {
        &mut self.raw
    }

    pub fn into_raw(self) -> H {
        self.raw
    }
}

/// At most one handle per role.
#[derive(Debug)]
pub struct ChartRegistry<H> {
    entries: BTreeMap<ChartRole, ChartHandle<H>>,
}

impl<H> Default for ChartRegistry<H> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<H> ChartRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, role: ChartRole) -> Option<&ChartHandle<H>> {
        self.entries.get(&role)
    }

    pub fn get_mut(&mut self, role: ChartRole) -> Option<&mut ChartHandle<H>> {
        self.entries.get_mut(&role)
    }

    pub fn has(&self, role: ChartRole) -> bool {
        self.entries.contains_key(&role)
    }

    /// Store `handle` under its role. A handle already stored for that role
    /// is returned so the caller can destroy it.
    pub fn set(&mut self, handle: ChartHandle<H>) -> Option<ChartHandle<H>> {
        self.entries.insert(handle.role(), handle)
    }

    pub fn remove(&mut self, role: ChartRole) -> Option<ChartHandle<H>> {
        self.entries.remove(&role)
    }

    pub fn roles(&self) -> impl Iterator<Item = ChartRole> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Take every handle out, in role order.
    pub fn drain(&mut self) -> Vec<ChartHandle<H>> {
        std::mem::take(&mut self.entries).into_values().collect()
    }
}
