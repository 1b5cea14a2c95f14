//! The authoritative in-memory list of widget sets.
//!
//! Callers hold `WidgetSetId`/`WidgetId` handles, never references. Every
//! mutator re-resolves its handles against the live list and does nothing when
//! a handle no longer resolves.

use super::codec;
use crate::config::AppSettings;
use crate::preview::{self, Preview};
use helium_core::{
    BoxedGateway, BoxedNotifier, BoxedOverlayHost, OverlayHost, PersistenceError,
    PersistenceGateway, ReloadNotifier, KEY_WIDGET_PROPERTIES, PREFERENCES_DOMAIN,
};
use helium_types::{
    Anchor, WidgetConfig, WidgetId, WidgetInstance, WidgetModule, WidgetSet, WidgetSetDetails,
    WidgetSetId,
};
use log::{debug, info};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

pub struct WidgetSetStore {
    sets: Vec<WidgetSet>,
    gateway: BoxedGateway,
    notifier: BoxedNotifier,
    overlay: Option<BoxedOverlayHost>,
}

impl WidgetSetStore {
    /// Create a store and load whatever is persisted
    pub fn open(gateway: BoxedGateway, notifier: BoxedNotifier) -> Result<Self, StoreError> {
        let mut store = Self {
            sets: Vec::new(),
            gateway,
            notifier,
            overlay: None,
        };
        store.load()?;
        Ok(store)
    }

    /// Attach the overlay host that gets power-cycled when a set is created
    pub fn with_overlay(mut self, overlay: BoxedOverlayHost) -> Self {
        self.overlay = Some(overlay);
        self
    }

    /// Replace the in-memory list with the persisted one
    pub fn load(&mut self) -> Result<(), StoreError> {
        let raw = self.gateway.get(PREFERENCES_DOMAIN, KEY_WIDGET_PROPERTIES)?;
        self.sets = codec::decode(raw.as_ref());
        info!("Loaded {} widget sets", self.sets.len());
        Ok(())
    }

    /// Persist the full list and ask the overlay to reload.
    ///
    /// An empty list removes the key instead of storing an empty value. The
    /// reload is requested even when the write fails; the failure is then
    /// returned and modified flags are kept.
    pub fn save(&mut self) -> Result<(), StoreError> {
        let encoded = codec::encode(&self.sets);
        let written = if encoded.is_empty() {
            self.gateway
                .delete(PREFERENCES_DOMAIN, KEY_WIDGET_PROPERTIES)
                .map(|()| debug!("No widget sets left, removed stored key"))
        } else {
            self.gateway
                .set(PREFERENCES_DOMAIN, KEY_WIDGET_PROPERTIES, Value::Array(encoded))
                .map(|()| debug!("Saved {} widget sets", self.sets.len()))
        };

        if written.is_ok() {
            for widget in self.sets.iter_mut().flat_map(|set| set.widgets.iter_mut()) {
                widget.modified = false;
            }
        }
        self.notifier.notify();
        Ok(written?)
    }

    pub fn sets(&self) -> &[WidgetSet] {
        &self.sets
    }

    /// Current version of a set, if it still exists
    pub fn get_updated_widget_set(&self, set: WidgetSetId) -> Option<&WidgetSet> {
        self.sets.iter().find(|s| s.id() == set)
    }

    fn set_mut(&mut self, set: WidgetSetId) -> Option<&mut WidgetSet> {
        let found = self.sets.iter_mut().find(|s| s.id() == set);
        if found.is_none() {
            debug!("Widget set {} no longer exists", set);
        }
        found
    }

    fn save_if(&mut self, auto_save: bool) -> Result<(), StoreError> {
        if auto_save {
            self.save()
        } else {
            Ok(())
        }
    }

    /// Append a new widget to a set and return it.
    ///
    /// `config` is reinterpreted under `module` when it belongs to another one.
    /// The instance is returned even when the set no longer exists.
    pub fn add_widget(
        &mut self,
        set: WidgetSetId,
        module: WidgetModule,
        config: Option<&WidgetConfig>,
        auto_save: bool,
    ) -> Result<WidgetInstance, StoreError> {
        let mut widget = WidgetInstance::with_module(module);
        if let Some(config) = config {
            widget.set_config(config);
        }

        if let Some(target) = self.set_mut(set) {
            target.widgets.push(widget.clone());
            debug!("Added {} widget to '{}'", module, target.title());
        }
        self.save_if(auto_save)?;
        Ok(widget)
    }

    /// Remove the widget at `index`
    pub fn remove_widget_at(
        &mut self,
        set: WidgetSetId,
        index: usize,
        auto_save: bool,
    ) -> Result<(), StoreError> {
        let Some(target) = self.set_mut(set) else {
            return Ok(());
        };
        if index >= target.widgets.len() {
            debug!("No widget at position {} in '{}'", index, target.title());
            return Ok(());
        }
        target.widgets.remove(index);
        self.save_if(auto_save)
    }

    pub fn remove_widget(
        &mut self,
        set: WidgetSetId,
        widget: WidgetId,
        auto_save: bool,
    ) -> Result<(), StoreError> {
        let position = self
            .get_updated_widget_set(set)
            .and_then(|s| s.position_of(widget));
        match position {
            Some(index) => self.remove_widget_at(set, index, auto_save),
            None => Ok(()),
        }
    }

    /// Move the widgets at `from` so they sit before the widget currently at
    /// `to` (or at the end when `to` is the length). Never saves.
    pub fn move_widgets(&mut self, set: WidgetSetId, from: &[usize], to: usize) {
        if let Some(target) = self.set_mut(set) {
            move_elements(&mut target.widgets, from, to);
        }
    }

    /// Replace the config of one widget. Module and identity stay as they are.
    pub fn update_widget_config(
        &mut self,
        set: WidgetSetId,
        widget: WidgetId,
        config: &WidgetConfig,
        auto_save: bool,
    ) -> Result<(), StoreError> {
        let Some(target) = self
            .set_mut(set)
            .and_then(|s| s.widgets.iter_mut().find(|w| w.id() == widget))
        else {
            return Ok(());
        };

        target.set_config(config);
        target.modified = true;
        self.save_if(auto_save)
    }

    /// Append a set. A set whose identity is already present is ignored.
    pub fn add_widget_set(&mut self, set: WidgetSet, auto_save: bool) -> Result<(), StoreError> {
        if self.get_updated_widget_set(set.id()).is_some() {
            debug!("Widget set {} is already stored", set.id());
            return Ok(());
        }
        self.sets.push(set);
        self.save_if(auto_save)
    }

    pub fn remove_widget_set(&mut self, set: WidgetSetId, auto_save: bool) -> Result<(), StoreError> {
        let Some(index) = self.sets.iter().position(|s| s.id() == set) else {
            debug!("Widget set {} no longer exists", set);
            return Ok(());
        };
        let removed = self.sets.remove(index);
        info!("Removed widget set '{}'", removed.title());
        self.save_if(auto_save)
    }

    /// Create an empty set with the standard attributes for a new set.
    ///
    /// A running overlay is switched off and on again so it picks the set up.
    pub fn create_widget_set(
        &mut self,
        title: &str,
        anchor: Anchor,
        auto_save: bool,
    ) -> Result<WidgetSetId, StoreError> {
        let set = WidgetSet::new(WidgetSetDetails::for_new_set(title, anchor));
        let id = set.id();
        self.add_widget_set(set, auto_save)?;
        info!("Created widget set '{}'", title);

        if let Some(overlay) = &self.overlay {
            if overlay.is_enabled() {
                overlay.set_enabled(false);
                overlay.set_enabled(true);
            }
        }
        Ok(id)
    }

    /// Overwrite every attribute of a set. Its widgets are left alone.
    pub fn edit_widget_set(
        &mut self,
        set: WidgetSetId,
        details: &WidgetSetDetails,
        auto_save: bool,
    ) -> Result<(), StoreError> {
        let Some(target) = self.set_mut(set) else {
            return Ok(());
        };
        target.details = details.clone();
        self.save_if(auto_save)
    }

    /// Render the preview of one widget, clearing its modified flag
    pub fn preview_widget(
        &mut self,
        set: WidgetSetId,
        widget: WidgetId,
        settings: &AppSettings,
    ) -> Option<Preview> {
        let target = self
            .set_mut(set)?
            .widgets
            .iter_mut()
            .find(|w| w.id() == widget)?;
        Some(preview::preview(target, settings))
    }
}

/// Reorder `items` so the elements at `from` end up, in their original
/// relative order, just before the element that was at `to`.
/// Out-of-range and repeated offsets are ignored.
fn move_elements<T>(items: &mut Vec<T>, from: &[usize], to: usize) {
    let mut offsets: Vec<usize> = from.iter().copied().filter(|&i| i < items.len()).collect();
    offsets.sort_unstable();
    offsets.dedup();
    if offsets.is_empty() {
        return;
    }

    let to = to.min(items.len());
    let insert_at = to - offsets.iter().filter(|&&i| i < to).count();

    let mut moved = Vec::with_capacity(offsets.len());
    let mut kept = Vec::with_capacity(items.len() - offsets.len());
    for (index, item) in items.drain(..).enumerate() {
        if offsets.binary_search(&index).is_ok() {
            moved.push(item);
        } else {
            kept.push(item);
        }
    }

    kept.splice(insert_at..insert_at, moved);
    *items = kept;
}
