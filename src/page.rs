//! Page context.
//!
//! `Page` owns the document and every interaction component of one
//! call-script page. Host events (clicks, typing, key presses, input
//! changes, pointer movement, scrolling, the passage of time) come in
//! through its methods; all placeholder writes go through
//! [`Page::sync_group`].

use crate::bridge::ExternalInputBinding;
use crate::card::{Card, CardAssembler, ClickAction};
use crate::clipboard::Clipboard;
use crate::config::PageConfig;
use crate::dom::{Document, NodeId};
use crate::error::CopyError;
use crate::fields::{is_commit_key, Deactivation, FieldController, FieldState};
use crate::models::{ChannelFilter, ScriptRecord};
use crate::navigation::{set_active_button, toggle_active_page, update_module, update_titles};
use crate::registry::{GroupRegistry, PropagateOutcome};
use crate::render::{
    build_page, generate_nav_buttons, generate_script_modules, CANVAS_CLASS, CHANNEL_SELECT_ID,
    NAV_CONTAINER_CLASS, SEARCH_BUTTON_ID, SEARCH_INPUT_ID,
};
use crate::search::{SearchManager, SearchOutcome};
use crate::text::normalize_field_value;
use crate::timers::{Scheduler, TimerKey};
use crate::tooltip::{Geometry, NavTooltips, Tooltip, TooltipKind, Viewport};

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

const NAV_TOOLTIP_CLASS: &str = "nav-tooltip";

/// Where a group write came from. The origin is never written back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOrigin {
    Field(NodeId),
    Input(NodeId),
    /// A card reset control.
    Page,
}

/// What a click did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignored,
    FieldActivated(NodeId),
    CardReset(NodeId),
    Copied(String),
    CopyFailed(CopyError),
    Navigated,
    Searched(SearchOutcome),
}

pub struct Page {
    doc: Document,
    config: PageConfig,
    registry: GroupRegistry,
    fields: FieldController,
    assembler: CardAssembler,
    cards: Vec<Card>,
    bridges: Vec<ExternalInputBinding>,
    tooltip: Option<Tooltip>,
    nav_tooltips: NavTooltips,
    search: SearchManager,
    timers: Scheduler,
    viewport: Viewport,
    geometry: Box<dyn Geometry>,
    clipboard: Box<dyn Clipboard>,
}

impl Page {
    /// Take over an already built document.
    pub fn new(
        doc: Document,
        config: PageConfig,
        geometry: Box<dyn Geometry>,
        clipboard: Box<dyn Clipboard>,
    ) -> Self {
        let mut page = Self {
            registry: GroupRegistry::new(&config.classes.editable_field),
            fields: FieldController::new(&config.classes),
            assembler: CardAssembler::new(&config),
            cards: Vec::new(),
            bridges: Vec::new(),
            tooltip: None,
            nav_tooltips: NavTooltips::default(),
            search: SearchManager::default(),
            timers: Scheduler::new(),
            viewport: Viewport::default(),
            doc,
            config,
            geometry,
            clipboard,
        };
        page.attach();
        page.apply_channel();
        update_module(&mut page.doc);
        page
    }

    /// Build the page for `records` and take it over.
    pub fn from_records(
        records: &[ScriptRecord],
        config: PageConfig,
        geometry: Box<dyn Geometry>,
        clipboard: Box<dyn Clipboard>,
    ) -> Self {
        let doc = build_page(records, &config);
        Self::new(doc, config, geometry, clipboard)
    }

    /// Replace the script area with freshly generated modules.
    pub fn load_scripts(&mut self, records: &[ScriptRecord]) {
        if let Some(focused) = self.doc.focused() {
            self.blur(focused);
        }
        if let Some(container) = self.doc.query_first_class(self.doc.root(), NAV_CONTAINER_CLASS) {
            generate_nav_buttons(&mut self.doc, container, records);
        }
        if let Some(canvas) = self.doc.query_first_class(self.doc.root(), CANVAS_CLASS) {
            self.doc.clear_children(canvas);
            generate_script_modules(&mut self.doc, canvas, records, &self.config);
        }
        self.attach();
        if self.search.is_active() {
            self.search.restore_default_state(&mut self.doc);
        } else {
            self.apply_channel();
            update_module(&mut self.doc);
        }
        log::debug!("Generated script modules for {} records", records.len());
    }

    /// Index fields, groups, cards and bound inputs, then bring every bound
    /// group in line with its input.
    fn attach(&mut self) {
        self.fields.attach(&mut self.doc);
        self.cards = self.assembler.attach(&mut self.doc);
        self.registry.rebuild(&self.doc);
        self.bridges = ExternalInputBinding::bind_all(&self.doc, &self.config.input_bindings);

        let initial: Vec<(NodeId, String, String)> = self
            .bridges
            .iter()
            .map(|b| (b.input, b.default_text.clone(), self.doc.value(b.input).to_string()))
            .collect();
        for (input, default_text, value) in initial {
            self.sync_group(&default_text, &value, SyncOrigin::Input(input));
        }
        log::debug!(
            "Attached {} fields in {} groups across {} cards",
            self.fields.len(),
            self.registry.group_count(),
            self.cards.len()
        );
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn registry(&self) -> &GroupRegistry {
        &self.registry
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    pub fn nav_tooltips(&self) -> &NavTooltips {
        &self.nav_tooltips
    }

    pub fn field_state(&self, field: NodeId) -> Option<FieldState> {
        self.fields.state(&self.doc, field)
    }

    pub fn is_card_locked(&self, card: NodeId) -> bool {
        self.assembler.is_locked(&self.doc, card)
    }

    pub fn is_search_active(&self) -> bool {
        self.search.is_active()
    }

    pub fn now(&self) -> u64 {
        self.timers.now()
    }

    pub fn is_timer_pending(&self, key: TimerKey) -> bool {
        self.timers.is_pending(key)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Markup of the whole page, e.g. for serving a snapshot.
    pub fn to_html(&self) -> String {
        self.doc.inner_html(self.doc.root())
    }

    // ========================================================================
    // Group Synchronization
    // ========================================================================

    /// Set a placeholder group to `raw` (trimmed; empty means the default
    /// text) and keep bound inputs in step. This is the only place group
    /// values are written.
    pub fn sync_group(&mut self, default_text: &str, raw: &str, origin: SyncOrigin) -> PropagateOutcome {
        let value = normalize_field_value(raw, default_text).to_string();
        let exclude = match origin {
            SyncOrigin::Field(field) => Some(field),
            _ => None,
        };
        let outcome = self
            .registry
            .propagate(&mut self.doc, default_text, &value, exclude);

        for bridge in self.bridges.iter().filter(|b| b.targets(default_text)) {
            if origin == SyncOrigin::Input(bridge.input) {
                continue;
            }
            if outcome.reset {
                bridge.on_group_reset(&mut self.doc);
            } else {
                bridge.mirror(&mut self.doc, &value);
            }
        }
        outcome
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// A click on `target`. Focus leaves an edited field first, then the
    /// click is routed to the innermost control that handles it.
    pub fn click(&mut self, target: NodeId) -> ClickOutcome {
        let field = self
            .doc
            .closest(target, &self.config.classes.editable_field);
        if let Some(focused) = self.doc.focused() {
            if field != Some(focused) {
                self.blur(focused);
            }
        }

        if let Some(field) = field {
            return if self.activate_field(field) {
                ClickOutcome::FieldActivated(field)
            } else {
                ClickOutcome::Ignored
            };
        }

        if let Some(card) = self.assembler.card_of(&self.doc, target) {
            // nothing inside a locked card takes clicks, reset included
            if self.assembler.is_locked(&self.doc, card) {
                return ClickOutcome::Ignored;
            }
            if self.assembler.is_reset_control(&self.doc, target) {
                self.reset_card(card);
                return ClickOutcome::CardReset(card);
            }
            return match self
                .assembler
                .route_click(&self.doc, &self.registry, card, target)
            {
                ClickAction::Ignore => ClickOutcome::Ignored,
                ClickAction::Activate(field) => {
                    if !self.activate_field(field) {
                        return ClickOutcome::Ignored;
                    }
                    let message = self.config.messages.editing.clone();
                    self.show_tooltip(&message, TooltipKind::Info, card);
                    ClickOutcome::FieldActivated(field)
                }
                ClickAction::Copy => match self.copy_card(card) {
                    Ok(text) => ClickOutcome::Copied(text),
                    Err(err) => ClickOutcome::CopyFailed(err),
                },
            };
        }

        if let Some(button) = self.doc.closest(target, "nav-btn") {
            self.leave_search();
            set_active_button(&mut self.doc, button);
            return ClickOutcome::Navigated;
        }
        if let Some(item) = self.doc.closest(target, "nav-item") {
            self.leave_search();
            toggle_active_page(&mut self.doc, item);
            return ClickOutcome::Navigated;
        }
        if self.doc.id_of(target) == Some(SEARCH_BUTTON_ID) {
            return ClickOutcome::Searched(self.run_search());
        }
        ClickOutcome::Ignored
    }

    /// Replace the content of the field being edited, as typing would.
    /// Returns false when the field is not in edit mode.
    pub fn type_text(&mut self, field: NodeId, text: &str) -> bool {
        if !self.fields.is_editing(&self.doc, field) {
            return false;
        }
        self.doc.set_text_content(field, text);
        self.field_input(field);
        true
    }

    fn field_input(&mut self, field: NodeId) {
        let Some(trimmed) = self.fields.content_changed(&self.doc, field) else {
            return;
        };
        let Some(default_text) = self.fields.get(field).map(|f| f.default_text.clone()) else {
            return;
        };
        if trimmed.is_empty() {
            // the rest of the group catches up on blur
            for bridge in self.bridges.iter().filter(|b| b.targets(&default_text)) {
                bridge.mirror(&mut self.doc, "");
            }
        } else {
            self.sync_group(&default_text, &trimmed, SyncOrigin::Field(field));
        }
    }

    /// The value of an `input` element changed.
    pub fn set_input_value(&mut self, input: NodeId, value: &str) {
        self.doc.set_value(input, value);

        if self.doc.id_of(input) == Some(SEARCH_INPUT_ID) {
            self.timers
                .schedule(TimerKey::SearchDebounce, self.config.search_debounce_ms);
            return;
        }
        let Some(default_text) = self
            .bridges
            .iter()
            .find(|b| b.input == input)
            .map(|b| b.default_text.clone())
        else {
            return;
        };
        self.sync_group(&default_text, value, SyncOrigin::Input(input));
    }

    pub fn key_down(&mut self, target: NodeId, key: &str) {
        if self.fields.is_editing(&self.doc, target) {
            if is_commit_key(key) {
                self.blur(target);
            }
            return;
        }
        if key == "Enter" && self.doc.id_of(target) == Some(SEARCH_INPUT_ID) {
            self.timers.cancel(TimerKey::SearchDebounce);
            self.run_search();
        }
    }

    /// Focus left `target`.
    pub fn blur(&mut self, target: NodeId) {
        let Some(default_text) = self.fields.get(target).map(|f| f.default_text.clone()) else {
            return;
        };
        match self.fields.deactivate(&mut self.doc, target) {
            Deactivation::Restored => {
                self.sync_group(&default_text, &default_text, SyncOrigin::Field(target));
            }
            Deactivation::Filled(value) => {
                self.sync_group(&default_text, &value, SyncOrigin::Field(target));
            }
            Deactivation::Ignored => {}
        }
    }

    /// The channel selector changed.
    pub fn change_channel(&mut self, value: &str) {
        if let Some(select) = self.doc.by_id(CHANNEL_SELECT_ID) {
            self.doc.set_value(select, value);
        }
        self.apply_channel();
        self.leave_search();
    }

    pub fn scroll(&mut self) {
        if let Some(tooltip) = self.tooltip.as_mut() {
            tooltip.hide(&mut self.doc);
        }
        self.timers.cancel(TimerKey::TooltipHide);
        if let Some(active) = self.nav_tooltips.active() {
            self.hide_nav_tooltip(active);
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        if let Some(tooltip) = self.tooltip.as_mut() {
            tooltip.reposition(&mut self.doc, self.geometry.as_ref(), self.viewport);
        }
    }

    /// Pointer entered a side-navigation item.
    pub fn mouse_enter(&mut self, item: NodeId) {
        let Some(tip) = self.doc.query_first_class(item, NAV_TOOLTIP_CLASS) else {
            return;
        };
        let previous = self.nav_tooltips.active().filter(|&t| t != tip);
        self.nav_tooltips.enter(&mut self.doc, item, tip);
        self.timers.cancel(TimerKey::NavTooltipPark(tip));
        if let Some(previous) = previous {
            self.timers.schedule(
                TimerKey::NavTooltipPark(previous),
                self.config.animation_duration_ms,
            );
        }
        self.timers
            .schedule(TimerKey::NavTooltipShow, self.config.nav_tooltip_delay_ms);
    }

    pub fn mouse_leave(&mut self, item: NodeId) {
        let Some(tip) = self.doc.query_first_class(item, NAV_TOOLTIP_CLASS) else {
            return;
        };
        self.hide_nav_tooltip(tip);
    }

    pub fn mouse_move(&mut self, item: NodeId, pointer_y: f64) {
        let Some(tip) = self.doc.query_first_class(item, NAV_TOOLTIP_CLASS) else {
            return;
        };
        self.nav_tooltips
            .follow(&mut self.doc, self.geometry.as_ref(), item, tip, pointer_y);
    }

    /// Let `ms` milliseconds pass, firing every timer that falls due.
    pub fn advance(&mut self, ms: u64) {
        let until = self.timers.now() + ms;
        while let Some(key) = self.timers.pop_due(until) {
            self.fire(key);
        }
        self.timers.set_now(until);
    }

    fn fire(&mut self, key: TimerKey) {
        match key {
            TimerKey::TooltipHide => {
                if let Some(tooltip) = self.tooltip.as_mut() {
                    tooltip.hide(&mut self.doc);
                }
            }
            TimerKey::SearchDebounce => {
                self.run_search();
            }
            TimerKey::CardUnlock(card) => {
                self.assembler.set_locked(&mut self.doc, card, false);
            }
            TimerKey::NavTooltipShow => {
                self.nav_tooltips
                    .show_pending(&mut self.doc, self.geometry.as_ref(), self.viewport);
            }
            TimerKey::NavTooltipPark(tip) => {
                self.nav_tooltips.park(&mut self.doc, tip);
            }
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn activate_field(&mut self, field: NodeId) -> bool {
        let locked = self
            .assembler
            .card_of(&self.doc, field)
            .is_some_and(|card| self.assembler.is_locked(&self.doc, card));
        self.fields.activate(&mut self.doc, field, locked)
    }

    fn reset_card(&mut self, card: NodeId) {
        for (_, default_text) in self.assembler.resettable_fields(&self.doc, card) {
            self.sync_group(&default_text, &default_text, SyncOrigin::Page);
        }
        log::debug!("Reset card {:?}", card);
    }

    fn copy_card(&mut self, card: NodeId) -> Result<String, CopyError> {
        let result = self
            .assembler
            .validate_and_serialize(&self.doc, card)
            .map_err(CopyError::from)
            .and_then(|text| {
                self.clipboard.write_text(&text)?;
                Ok(text)
            });

        match &result {
            Ok(_) => {
                let message = self.config.messages.success.clone();
                self.show_tooltip(&message, TooltipKind::Success, card);
                self.assembler.set_locked(&mut self.doc, card, true);
                self.timers
                    .schedule(TimerKey::CardUnlock(card), self.config.tooltip_duration_ms);
            }
            Err(CopyError::Validation(err)) => {
                log::debug!("Copy blocked: {}", err);
                let message = self.config.messages.empty.clone();
                self.show_tooltip(&message, TooltipKind::Warning, card);
            }
            Err(CopyError::Clipboard(err)) => {
                log::warn!("Copy failed: {}", err);
                let message = self.config.messages.error.clone();
                self.show_tooltip(&message, TooltipKind::Error, card);
            }
        }
        result
    }

    /// Show the shared copy tooltip above `anchor`, creating it on first
    /// use, and schedule it to hide.
    fn show_tooltip(&mut self, message: &str, kind: TooltipKind, anchor: NodeId) {
        let class = &self.config.classes.tooltip;
        let doc = &mut self.doc;
        let tooltip = self
            .tooltip
            .get_or_insert_with(|| Tooltip::create(doc, class));
        tooltip.show(
            &mut self.doc,
            self.geometry.as_ref(),
            self.viewport,
            message,
            kind,
            anchor,
        );
        self.timers
            .schedule(TimerKey::TooltipHide, self.config.tooltip_duration_ms);
    }

    fn hide_nav_tooltip(&mut self, tip: NodeId) {
        self.nav_tooltips.leave(&mut self.doc, tip);
        self.timers.cancel(TimerKey::NavTooltipShow);
        self.timers.schedule(
            TimerKey::NavTooltipPark(tip),
            self.config.animation_duration_ms,
        );
    }

    fn run_search(&mut self) -> SearchOutcome {
        let term = self
            .doc
            .by_id(SEARCH_INPUT_ID)
            .map(|input| self.doc.value(input).to_string())
            .unwrap_or_default();
        self.search.perform(&mut self.doc, &term)
    }

    fn leave_search(&mut self) {
        if self.search.is_active() {
            self.search.restore_default_state(&mut self.doc);
        }
    }

    fn apply_channel(&mut self) {
        let value = self
            .doc
            .by_id(CHANNEL_SELECT_ID)
            .map(|select| self.doc.value(select).to_string())
            .unwrap_or_else(|| ChannelFilter::All.as_str().to_string());
        update_titles(&mut self.doc, ChannelFilter::parse(&value));
    }
}
