use super::*;
use crate::keyboard::{KeyEdit, key_edit};
use crate::validation::is_js_whitespace;

const LOAD_CONSOLE_MESSAGES: [&str; 4] = [
    "🎯 All JavaScript features loaded:",
    "✅ Event Handling: Click, hover, keyboard events",
    "✅ Interactive Elements: Theme switcher, counter game, FAQ, tabs",
    "✅ Form Validation: Real-time validation with regex patterns",
];
const READY_CONSOLE_MESSAGE: &str = "🚀 TechGadget Store loaded successfully!";

#[derive(Debug, Clone)]
pub(crate) struct EventState {
    pub(crate) event_type: String,
    pub(crate) target: NodeId,
    pub(crate) current_target: NodeId,
    pub(crate) default_prevented: bool,
    pub(crate) key: Option<String>,
}

impl EventState {
    fn new(event_type: &str, target: NodeId) -> Self {
        Self {
            event_type: event_type.to_string(),
            target,
            current_target: target,
            default_prevented: false,
            key: None,
        }
    }
}

/// A loaded TechGadget Store page.
///
/// All interaction goes through selector based methods that mirror what a
/// user does in a browser. Each handler updates the view-model and the
/// view-model is rendered back onto the DOM before control returns.
#[derive(Debug)]
pub struct Storefront {
    pub(crate) dom: Dom,
    pub(crate) bindings: PageBindings,
    pub(crate) listeners: ListenerStore,
    pub(crate) validators: Validators,
    pub(crate) state: PageState,
    pub(crate) scheduler: SchedulerState,
    pub(crate) platform_mocks: PlatformMockState,
    pub(crate) trace_state: TraceState,
}

impl Storefront {
    /// Loads the bundled page markup.
    pub fn new() -> Result<Self> {
        Self::from_html(STOREFRONT_HTML)
    }

    /// Loads custom markup. Every element the page binds to must exist.
    pub fn from_html(html: &str) -> Result<Self> {
        let mut dom = parse_html(html)?;
        for node in dom.query_selector_all("textarea")? {
            let initial = dom.text_content(node);
            dom.set_value(node, &initial)?;
        }

        let BoundPage {
            bindings,
            listeners,
            accordion,
            tabs,
            theme,
        } = bind_page(&dom)?;

        let mut state = PageState::new();
        state.accordion = accordion;
        state.tabs = tabs;
        state.theme = theme;
        for field in FormField::ALL {
            state.form.field_mut(field).value = dom.value(bindings.inputs[field.index()])?;
        }

        let mut page = Self {
            dom,
            bindings,
            listeners,
            validators: Validators::new()?,
            state,
            scheduler: SchedulerState::default(),
            platform_mocks: PlatformMockState::default(),
            trace_state: TraceState::default(),
        };

        // The script body logs first; DOMContentLoaded fires after it.
        for message in LOAD_CONSOLE_MESSAGES {
            page.console_log(message);
        }
        page.console_log(READY_CONSOLE_MESSAGE);
        page.render()?;
        Ok(page)
    }

    pub fn enable_trace(&mut self, enabled: bool) {
        self.trace_state.enabled = enabled;
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        self.trace_state.logs.drain(..).collect()
    }

    pub fn set_trace_stderr(&mut self, enabled: bool) {
        self.trace_state.to_stderr = enabled;
    }

    pub fn set_trace_events(&mut self, enabled: bool) {
        self.trace_state.events = enabled;
    }

    pub fn set_trace_timers(&mut self, enabled: bool) {
        self.trace_state.timers = enabled;
    }

    pub fn set_trace_log_limit(&mut self, max_entries: usize) -> Result<()> {
        if max_entries == 0 {
            return Err(Error::Config(
                "set_trace_log_limit requires at least 1 entry".into(),
            ));
        }
        self.trace_state.log_limit = max_entries;
        while self.trace_state.logs.len() > self.trace_state.log_limit {
            self.trace_state.logs.pop_front();
        }
        Ok(())
    }

    pub fn set_timer_step_limit(&mut self, max_steps: usize) -> Result<()> {
        if max_steps == 0 {
            return Err(Error::Timer(
                "set_timer_step_limit requires at least 1 step".into(),
            ));
        }
        self.scheduler.timer_step_limit = max_steps;
        Ok(())
    }

    pub fn take_alert_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.platform_mocks.alert_messages)
    }

    pub fn take_console_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.platform_mocks.console_messages)
    }

    pub fn click(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.attr(target, "disabled").is_some() {
            return Ok(());
        }

        let click_outcome = self.dispatch_event(target, "click", None)?;
        if click_outcome.default_prevented {
            return Ok(());
        }

        if is_submit_control(&self.dom, target) {
            if let Some(form_id) = self.dom.find_ancestor_by_tag(target, "form") {
                self.dispatch_event(form_id, "submit", None)?;
            }
        }

        Ok(())
    }

    pub fn hover(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.dispatch_event(target, "mouseover", None)?;
        Ok(())
    }

    pub fn mouse_out(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.dispatch_event(target, "mouseout", None)?;
        Ok(())
    }

    /// Presses one key: `keydown`, then for text controls the edit the key
    /// produces followed by `input`. `key` is a `KeyboardEvent.key` value
    /// such as `"a"`, `"Enter"` or `"Backspace"`.
    pub fn press_key(&mut self, selector: &str, key: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let outcome = self.dispatch_event(target, "keydown", Some(key))?;
        if outcome.default_prevented || !is_text_control(&self.dom, target) {
            return Ok(());
        }
        if self.dom.attr(target, "disabled").is_some() || self.dom.attr(target, "readonly").is_some()
        {
            return Ok(());
        }

        let mut value = self.dom.value(target)?;
        match key_edit(key) {
            KeyEdit::Insert(ch) => value.push(ch),
            KeyEdit::DeleteBackward => {
                if value.pop().is_none() {
                    return Ok(());
                }
            }
            KeyEdit::None => return Ok(()),
        }
        self.dom.set_value(target, &value)?;
        self.dispatch_event(target, "input", None)?;
        Ok(())
    }

    /// Replaces the value of an input or textarea and fires one `input`.
    pub fn type_text(&mut self, selector: &str, text: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if !is_text_control(&self.dom, target) {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input or textarea".into(),
                actual: self.dom.tag_name(target).unwrap_or("non-element").to_string(),
            });
        }
        if self.dom.attr(target, "disabled").is_some() || self.dom.attr(target, "readonly").is_some()
        {
            return Ok(());
        }

        self.dom.set_value(target, text)?;
        self.dispatch_event(target, "input", None)?;
        Ok(())
    }

    /// Submits the form matched by `selector`, or the form containing it.
    pub fn submit(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let form = if self.dom.tag_name(target) == Some("form") {
            Some(target)
        } else {
            self.dom.find_ancestor_by_tag(target, "form")
        };

        if let Some(form_id) = form {
            self.dispatch_event(form_id, "submit", None)?;
        }
        Ok(())
    }

    pub fn dispatch(&mut self, selector: &str, event: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.dispatch_event(target, event, None)?;
        Ok(())
    }

    pub fn now_ms(&self) -> i64 {
        self.scheduler.now_ms
    }

    pub fn pending_timers(&self) -> Vec<PendingTimer> {
        self.scheduler.pending()
    }

    pub fn advance_time(&mut self, delta_ms: i64) -> Result<()> {
        if delta_ms < 0 {
            return Err(Error::Timer(
                "advance_time requires non-negative milliseconds".into(),
            ));
        }
        let from = self.scheduler.now_ms;
        self.scheduler.now_ms = self.scheduler.now_ms.saturating_add(delta_ms);
        let ran = self.run_timer_queue(Some(self.scheduler.now_ms), false)?;
        self.trace_state.timer_line(format!(
            "[timer] advance delta_ms={} from={} to={} ran_due={}",
            delta_ms, from, self.scheduler.now_ms, ran
        ));
        Ok(())
    }

    pub fn advance_time_to(&mut self, target_ms: i64) -> Result<()> {
        if target_ms < self.scheduler.now_ms {
            return Err(Error::Timer(format!(
                "advance_time_to requires target >= now_ms (target={target_ms}, now_ms={})",
                self.scheduler.now_ms
            )));
        }
        let from = self.scheduler.now_ms;
        self.scheduler.now_ms = target_ms;
        let ran = self.run_timer_queue(Some(target_ms), false)?;
        self.trace_state.timer_line(format!(
            "[timer] advance_to from={} to={} ran_due={}",
            from, self.scheduler.now_ms, ran
        ));
        Ok(())
    }

    /// Runs every pending timer, moving the clock to each due time.
    pub fn flush(&mut self) -> Result<()> {
        let from = self.scheduler.now_ms;
        let ran = self.run_timer_queue(None, true)?;
        self.trace_state.timer_line(format!(
            "[timer] flush from={} to={} ran={}",
            from, self.scheduler.now_ms, ran
        ));
        Ok(())
    }

    pub fn run_due_timers(&mut self) -> Result<usize> {
        let ran = self.run_timer_queue(Some(self.scheduler.now_ms), false)?;
        self.trace_state.timer_line(format!(
            "[timer] run_due now_ms={} ran={}",
            self.scheduler.now_ms, ran
        ));
        Ok(ran)
    }

    fn run_timer_queue(&mut self, due_limit: Option<i64>, advance_clock: bool) -> Result<usize> {
        let mut steps = 0usize;
        while let Some(next_idx) = self.scheduler.next_task_index(due_limit) {
            steps += 1;
            if steps > self.scheduler.timer_step_limit {
                return Err(self.scheduler.step_limit_error(steps, due_limit));
            }
            let task = self.scheduler.task_queue.remove(next_idx);
            if advance_clock && task.due_at > self.scheduler.now_ms {
                self.scheduler.now_ms = task.due_at;
            }
            self.execute_timer_task(task)?;
        }
        Ok(steps)
    }

    fn execute_timer_task(&mut self, task: ScheduledTask) -> Result<()> {
        self.trace_state.timer_line(format!(
            "[timer] run id={} due_at={} task={} now_ms={}",
            task.id,
            task.due_at,
            task.task.label(),
            self.scheduler.now_ms
        ));
        match task.task {
            TimerTask::RestoreCounterScale => self.state.counter.scale = Scale::Rest,
            TimerTask::ClearCartHighlight => self.state.cart.highlighted = false,
            TimerTask::HideSuccessBanner => self.state.form.success_visible = false,
        }
        self.render()
    }

    fn set_timeout(&mut self, task: TimerTask, delay_ms: i64) {
        let scheduled = self.scheduler.schedule(task, delay_ms);
        self.trace_state.timer_line(format!(
            "[timer] schedule id={} due_at={} task={}",
            scheduled.id,
            scheduled.due_at,
            task.label()
        ));
    }

    pub fn counter_value(&self) -> BigUint {
        self.state.counter.value.clone()
    }

    pub fn counter_tone(&self) -> CounterTone {
        self.state.counter.tone
    }

    pub fn cart_items(&self) -> BigUint {
        self.state.cart.items.clone()
    }

    pub fn theme(&self) -> Theme {
        self.state.theme
    }

    /// Index of the open FAQ answer, in document order.
    pub fn open_faq(&self) -> Option<usize> {
        self.state.accordion.open
    }

    /// Index of the active tab button, in document order.
    pub fn active_tab(&self) -> Option<usize> {
        self.state.tabs.active
    }

    pub fn field_value(&self, field: FormField) -> &str {
        &self.state.form.field(field).value
    }

    pub fn field_error(&self, field: FormField) -> Option<&'static str> {
        self.state.form.field(field).error
    }

    pub fn is_success_visible(&self) -> bool {
        self.state.form.success_visible
    }

    pub fn validators(&self) -> &Validators {
        &self.validators
    }

    pub fn text(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.text_content(target))
    }

    pub fn value(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        self.dom.value(target)
    }

    pub fn class_list(&self, selector: &str) -> Result<Vec<String>> {
        let target = self.select_one(selector)?;
        Ok(self.dom.class_list(target))
    }

    /// Inline style value, `None` when the property is not set.
    pub fn style(&self, selector: &str, property: &str) -> Result<Option<String>> {
        let target = self.select_one(selector)?;
        Ok(self.dom.style(target, property))
    }

    /// Number of elements matching `selector` that carry `class_name`.
    pub fn count_with_class(&self, selector: &str, class_name: &str) -> Result<usize> {
        Ok(self
            .dom
            .query_selector_all(selector)?
            .into_iter()
            .filter(|node| self.dom.has_class(*node, class_name))
            .count())
    }

    pub fn assert_text(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.text_content(target);
        if actual != expected {
            return Err(self.assertion_failed(selector, target, expected, actual));
        }
        Ok(())
    }

    pub fn assert_value(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.value(target)?;
        if actual != expected {
            return Err(self.assertion_failed(selector, target, expected, actual));
        }
        Ok(())
    }

    pub fn assert_has_class(&self, selector: &str, class_name: &str, expected: bool) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.has_class(target, class_name);
        if actual != expected {
            return Err(self.assertion_failed(
                selector,
                target,
                &format!("class {class_name}={expected}"),
                format!("class {class_name}={actual}"),
            ));
        }
        Ok(())
    }

    /// `expected` of `""` asserts the property is not set.
    pub fn assert_style(&self, selector: &str, property: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.style(target, property).unwrap_or_default();
        if actual != expected {
            return Err(self.assertion_failed(
                selector,
                target,
                &format!("{property}: {expected}"),
                format!("{property}: {actual}"),
            ));
        }
        Ok(())
    }

    pub fn assert_exists(&self, selector: &str) -> Result<()> {
        let _ = self.select_one(selector)?;
        Ok(())
    }

    pub fn dump_dom(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.dump_node(target))
    }

    fn assertion_failed(
        &self,
        selector: &str,
        target: NodeId,
        expected: &str,
        actual: String,
    ) -> Error {
        Error::AssertionFailed {
            selector: selector.to_string(),
            expected: expected.to_string(),
            actual,
            dom_snippet: truncate_chars(&self.dom.dump_node(target), 200),
        }
    }

    fn select_one(&self, selector: &str) -> Result<NodeId> {
        self.dom
            .query_selector(selector)?
            .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
    }

    fn render(&mut self) -> Result<()> {
        crate::render::render(&mut self.dom, &self.bindings, &self.state)
    }

    fn console_log(&mut self, message: &str) {
        self.trace_state.line(format!("[console] {message}"));
        self.platform_mocks
            .console_messages
            .push(message.to_string());
    }

    fn alert(&mut self, message: String) {
        self.trace_state.line(format!("[alert] {message}"));
        self.platform_mocks.alert_messages.push(message);
    }

    fn dispatch_event(
        &mut self,
        target: NodeId,
        event_type: &str,
        key: Option<&str>,
    ) -> Result<EventState> {
        let mut event = EventState::new(event_type, target);
        event.key = key.map(str::to_string);

        // Target first, then ancestors.
        let mut cursor = Some(target);
        while let Some(node) = cursor {
            event.current_target = node;
            for action in self.listeners.get(node, event_type) {
                self.trace_state.event_line(format!(
                    "[event] {} target={} current={} action={:?}",
                    event.event_type,
                    self.dom.id_label(event.target),
                    self.dom.id_label(event.current_target),
                    action
                ));
                self.run_action(action, &mut event)?;
                self.render()?;
            }
            cursor = self.dom.parent(node);
        }

        self.trace_state.event_line(format!(
            "[event] done {} target={} default_prevented={}",
            event.event_type,
            self.dom.id_label(event.target),
            event.default_prevented
        ));
        Ok(event)
    }

    fn run_action(&mut self, action: Action, event: &mut EventState) -> Result<()> {
        match action {
            Action::ShowClick => self
                .state
                .output
                .show("🎉 Button was clicked!".into(), OutputTone::Click),
            Action::HoverIn => {
                self.state.output.show(
                    "🐭 Mouse is hovering over the button!".into(),
                    OutputTone::HoverIn,
                );
                self.state.hover_scale = Scale::Hover;
            }
            Action::HoverOut => {
                self.state
                    .output
                    .show("👋 Mouse left the button!".into(), OutputTone::HoverOut);
                self.state.hover_scale = Scale::Rest;
            }
            Action::ShowKey => {
                let key = event.key.as_deref().unwrap_or("Unidentified");
                let message = format!(
                    "⌨️ Key pressed: {key} (KeyCode: {})",
                    legacy_key_code(key)
                );
                self.state.output.show(message, OutputTone::Key);
            }
            Action::CountKeyboardChars => {
                let count = js_length(&self.dom.value(self.bindings.keyboard_demo)?);
                if self.state.output.lines.is_none() {
                    let placeholder = self.dom.text_content(self.bindings.event_output);
                    self.state.output.lines = Some(vec![placeholder]);
                }
                self.state
                    .output
                    .append(format!("📝 Character count: {count}"));
            }
            Action::ToggleTheme => self.state.theme = self.state.theme.toggled(),
            Action::IncrementCounter => {
                self.state.counter.increment();
                self.set_timeout(TimerTask::RestoreCounterScale, timing::COUNTER_PULSE_MS);
            }
            Action::ResetCounter => {
                self.state.counter.reset();
                self.set_timeout(
                    TimerTask::RestoreCounterScale,
                    timing::COUNTER_RESET_PULSE_MS,
                );
            }
            Action::ToggleFaq(idx) => self.state.accordion.select(idx),
            Action::SelectTab(idx) => self.state.tabs.select(idx),
            Action::ShowCart => {
                let message = format!(
                    "🛒 You have {} items in your cart!",
                    self.state.cart.items
                );
                self.alert(message);
            }
            Action::AddToCart => {
                self.state.cart.add_item();
                self.set_timeout(TimerTask::ClearCartHighlight, timing::CART_HIGHLIGHT_MS);
                self.render()?;
                self.alert("✅ Product added to cart!".into());
            }
            Action::ValidateField(field) => {
                let value = self.dom.value(self.bindings.inputs[field.index()])?;
                let valid = self.validators.validate(field, &value);
                let state = self.state.form.field_mut(field);
                state.value = value;
                state.error = if valid {
                    None
                } else {
                    Some(field.live_message())
                };
            }
            Action::CountMessageChars => {
                let value = self
                    .dom
                    .value(self.bindings.inputs[FormField::Message.index()])?;
                self.state.form.char_count = Some(CharCount::for_message(&value));
            }
            Action::SubmitForm => {
                event.default_prevented = true;
                self.submit_contact_form()?;
            }
        }
        Ok(())
    }

    fn submit_contact_form(&mut self) -> Result<()> {
        let mut is_valid = true;
        for field in FormField::ALL {
            let value = self.dom.value(self.bindings.inputs[field.index()])?;
            let valid = self.validators.validate(field, &value);
            let state = self.state.form.field_mut(field);
            state.value = value;
            if !valid {
                state.error = Some(field.submit_message());
                is_valid = false;
            }
        }

        if !is_valid {
            return Ok(());
        }

        self.state.form.success_text = Some(SUCCESS_TEXT);
        self.state.form.success_visible = true;
        self.state.form.reset();
        self.set_timeout(TimerTask::HideSuccessBanner, timing::SUCCESS_BANNER_MS);
        Ok(())
    }
}

fn is_text_control(dom: &Dom, node: NodeId) -> bool {
    match dom.tag_name(node) {
        Some("textarea") => true,
        Some("input") => !matches!(
            dom.attr(node, "type")
                .unwrap_or_default()
                .to_ascii_lowercase()
                .as_str(),
            "checkbox" | "radio" | "submit" | "button" | "reset" | "image" | "file" | "hidden"
        ),
        _ => false,
    }
}

fn is_submit_control(dom: &Dom, node: NodeId) -> bool {
    let kind = dom
        .attr(node, "type")
        .map(|kind| kind.trim_matches(is_js_whitespace).to_ascii_lowercase());
    match dom.tag_name(node) {
        Some("button") => matches!(kind.as_deref(), None | Some("") | Some("submit")),
        Some("input") => matches!(kind.as_deref(), Some("submit") | Some("image")),
        _ => false,
    }
}
