use super::*;

/// Page behavior attached to a node for one event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    ShowClick,
    HoverIn,
    HoverOut,
    ShowKey,
    CountKeyboardChars,
    ToggleTheme,
    IncrementCounter,
    ResetCounter,
    ToggleFaq(usize),
    SelectTab(usize),
    ShowCart,
    AddToCart,
    ValidateField(FormField),
    CountMessageChars,
    SubmitForm,
}

#[derive(Debug, Default, Clone)]
pub(crate) struct ListenerStore {
    map: HashMap<NodeId, HashMap<&'static str, Vec<Action>>>,
}

impl ListenerStore {
    pub(crate) fn add(&mut self, node_id: NodeId, event: &'static str, action: Action) {
        self.map
            .entry(node_id)
            .or_default()
            .entry(event)
            .or_default()
            .push(action);
    }

    /// Actions in registration order.
    pub(crate) fn get(&self, node_id: NodeId, event: &str) -> Vec<Action> {
        self.map
            .get(&node_id)
            .and_then(|events| events.get(event))
            .cloned()
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct FaqItem {
    pub(crate) question: NodeId,
    pub(crate) answer: NodeId,
    // Question text as written in the markup, glyph included.
    pub(crate) label: String,
}

#[derive(Debug, Clone)]
pub(crate) struct TabItem {
    pub(crate) button: NodeId,
    pub(crate) pane: NodeId,
}

/// Every node the page reads or writes, resolved once at load.
#[derive(Debug, Clone)]
pub(crate) struct PageBindings {
    pub(crate) body: NodeId,
    pub(crate) click_demo: NodeId,
    pub(crate) hover_demo: NodeId,
    pub(crate) keyboard_demo: NodeId,
    pub(crate) event_output: NodeId,
    pub(crate) theme_switch: NodeId,
    pub(crate) theme_toggle: NodeId,
    pub(crate) counter_value: NodeId,
    pub(crate) increment_btn: NodeId,
    pub(crate) reset_counter: NodeId,
    pub(crate) faq: Vec<FaqItem>,
    pub(crate) tabs: Vec<TabItem>,
    pub(crate) tab_panes: Vec<NodeId>,
    pub(crate) cart_btn: NodeId,
    pub(crate) cart_count: NodeId,
    pub(crate) shop_now: NodeId,
    pub(crate) contact_form: NodeId,
    pub(crate) form_success: NodeId,
    pub(crate) inputs: [NodeId; 5],
    pub(crate) errors: [NodeId; 5],
    pub(crate) message_count: NodeId,
}

pub(crate) struct BoundPage {
    pub(crate) bindings: PageBindings,
    pub(crate) listeners: ListenerStore,
    pub(crate) accordion: Accordion,
    pub(crate) tabs: TabStrip,
    pub(crate) theme: Theme,
}

fn require(dom: &Dom, id: &str) -> Result<NodeId> {
    dom.by_id(id)
        .ok_or_else(|| Error::MissingElement(format!("#{id}")))
}

fn require_each(dom: &Dom, ids: [&str; 5]) -> Result<[NodeId; 5]> {
    Ok([
        require(dom, ids[0])?,
        require(dom, ids[1])?,
        require(dom, ids[2])?,
        require(dom, ids[3])?,
        require(dom, ids[4])?,
    ])
}

pub(crate) fn bind_page(dom: &Dom) -> Result<BoundPage> {
    let body = dom
        .body()
        .ok_or_else(|| Error::MissingElement("body".into()))?;

    let mut faq = Vec::new();
    for question in dom.query_selector_all(".faq-question")? {
        let answer = dom.next_element_sibling(question).ok_or_else(|| {
            Error::MissingElement(format!(
                "answer after FAQ question {:?}",
                dom.text_content(question).trim()
            ))
        })?;
        faq.push(FaqItem {
            question,
            answer,
            label: dom.text_content(question),
        });
    }

    let mut tabs = Vec::new();
    for button in dom.query_selector_all(".tab-btn")? {
        let target = dom
            .attr(button, "data-tab")
            .ok_or_else(|| Error::MissingElement("data-tab on .tab-btn".into()))?;
        let pane = require(dom, &target)?;
        tabs.push(TabItem { button, pane });
    }
    let tab_panes = dom.query_selector_all(".tab-pane")?;

    let accordion = Accordion {
        open: faq
            .iter()
            .position(|item| dom.has_class(item.answer, "active")),
    };
    let theme = if dom.has_class(body, "dark-theme") {
        Theme::Dark
    } else {
        Theme::Light
    };
    let tab_strip = TabStrip {
        active: tabs
            .iter()
            .position(|item| dom.has_class(item.button, "active")),
    };

    let bindings = PageBindings {
        body,
        click_demo: require(dom, "clickDemo")?,
        hover_demo: require(dom, "hoverDemo")?,
        keyboard_demo: require(dom, "keyboardDemo")?,
        event_output: require(dom, "eventOutput")?,
        theme_switch: require(dom, "themeSwitch")?,
        theme_toggle: require(dom, "themeToggle")?,
        counter_value: require(dom, "counterValue")?,
        increment_btn: require(dom, "incrementBtn")?,
        reset_counter: require(dom, "resetCounter")?,
        faq,
        tabs,
        tab_panes,
        cart_btn: require(dom, "cartBtn")?,
        cart_count: require(dom, "cartCount")?,
        shop_now: require(dom, "shopNow")?,
        contact_form: require(dom, "contactForm")?,
        form_success: require(dom, "formSuccess")?,
        inputs: require_each(dom, FormField::ALL.map(FormField::input_id))?,
        errors: require_each(dom, FormField::ALL.map(FormField::error_id))?,
        message_count: require(dom, "messageCount")?,
    };

    let listeners = register_listeners(&bindings);
    Ok(BoundPage {
        bindings,
        listeners,
        accordion,
        tabs: tab_strip,
        theme,
    })
}

fn register_listeners(b: &PageBindings) -> ListenerStore {
    let mut listeners = ListenerStore::default();

    listeners.add(b.click_demo, "click", Action::ShowClick);
    listeners.add(b.hover_demo, "mouseover", Action::HoverIn);
    listeners.add(b.hover_demo, "mouseout", Action::HoverOut);
    listeners.add(b.keyboard_demo, "keydown", Action::ShowKey);
    listeners.add(b.keyboard_demo, "input", Action::CountKeyboardChars);

    listeners.add(b.theme_switch, "click", Action::ToggleTheme);
    listeners.add(b.theme_toggle, "click", Action::ToggleTheme);

    listeners.add(b.increment_btn, "click", Action::IncrementCounter);
    listeners.add(b.reset_counter, "click", Action::ResetCounter);

    for (idx, item) in b.faq.iter().enumerate() {
        listeners.add(item.question, "click", Action::ToggleFaq(idx));
    }
    for (idx, item) in b.tabs.iter().enumerate() {
        listeners.add(item.button, "click", Action::SelectTab(idx));
    }

    listeners.add(b.cart_btn, "click", Action::ShowCart);
    listeners.add(b.shop_now, "click", Action::AddToCart);

    for field in FormField::ALL {
        listeners.add(b.inputs[field.index()], "input", Action::ValidateField(field));
    }
    listeners.add(b.contact_form, "submit", Action::SubmitForm);
    listeners.add(
        b.inputs[FormField::Message.index()],
        "input",
        Action::CountMessageChars,
    );

    listeners
}
