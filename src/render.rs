use super::*;

const ERROR_BORDER: &str = "#ff6b6b";
const CART_HIGHLIGHT: &str = "#ff6b6b";

/// Projects the whole view-model onto the DOM. Idempotent: rendering the
/// same state twice leaves the same tree.
pub(crate) fn render(dom: &mut Dom, b: &PageBindings, state: &PageState) -> Result<()> {
    render_event_output(dom, b, state)?;
    render_theme(dom, b, state.theme)?;
    render_counter(dom, b, &state.counter)?;
    render_faq(dom, b, &state.accordion)?;
    render_tabs(dom, b, &state.tabs)?;
    render_cart(dom, b, &state.cart)?;
    render_form(dom, b, &state.form)
}

fn render_event_output(dom: &mut Dom, b: &PageBindings, state: &PageState) -> Result<()> {
    if let Some(lines) = &state.output.lines {
        dom.set_lines(b.event_output, lines)?;
    }
    if let Some(tone) = state.output.tone {
        let (background, border) = tone.colors();
        dom.set_style(b.event_output, "background-color", background)?;
        dom.set_style(b.event_output, "border-left-color", border)?;
    }
    dom.set_style(b.hover_demo, "transform", state.hover_scale.css())
}

fn render_theme(dom: &mut Dom, b: &PageBindings, theme: Theme) -> Result<()> {
    dom.set_class(b.body, "dark-theme", theme == Theme::Dark)?;
    dom.set_text_content(b.theme_toggle, theme.header_label())?;
    dom.set_text_content(b.theme_switch, theme.switch_label())
}

fn render_counter(dom: &mut Dom, b: &PageBindings, counter: &ClickCounter) -> Result<()> {
    dom.set_text_content(b.counter_value, &counter.value.to_string())?;
    dom.set_style(b.counter_value, "color", counter.tone.css())?;
    dom.set_style(b.counter_value, "transform", counter.scale.css())
}

fn render_faq(dom: &mut Dom, b: &PageBindings, accordion: &Accordion) -> Result<()> {
    for (idx, item) in b.faq.iter().enumerate() {
        let open = accordion.open == Some(idx);
        dom.set_class(item.answer, "active", open)?;
        dom.set_text_content(item.question, &faq_label(&item.label, open))?;
    }
    Ok(())
}

/// The question text with its indicator glyph: `▼` open, `▶` closed.
pub(crate) fn faq_label(label: &str, open: bool) -> String {
    let closed = label.replacen('▼', "▶", 1);
    if open {
        closed.replacen('▶', "▼", 1)
    } else {
        closed
    }
}

fn render_tabs(dom: &mut Dom, b: &PageBindings, tabs: &TabStrip) -> Result<()> {
    let active_pane = tabs.active.map(|idx| b.tabs[idx].pane);
    for (idx, item) in b.tabs.iter().enumerate() {
        dom.set_class(item.button, "active", tabs.active == Some(idx))?;
    }
    let panes = b
        .tab_panes
        .iter()
        .copied()
        .chain(b.tabs.iter().map(|item| item.pane));
    for pane in panes {
        dom.set_class(pane, "active", Some(pane) == active_pane)?;
    }
    Ok(())
}

fn render_cart(dom: &mut Dom, b: &PageBindings, cart: &Cart) -> Result<()> {
    dom.set_text_content(b.cart_count, &cart.items.to_string())?;
    let background = if cart.highlighted { CART_HIGHLIGHT } else { "" };
    dom.set_style(b.cart_btn, "background-color", background)
}

fn render_form(dom: &mut Dom, b: &PageBindings, form: &ContactForm) -> Result<()> {
    for field in FormField::ALL {
        let state = form.field(field);
        let input = b.inputs[field.index()];
        dom.set_value(input, &state.value)?;
        dom.set_text_content(b.errors[field.index()], state.error.unwrap_or(""))?;
        let border = if state.error.is_some() { ERROR_BORDER } else { "" };
        dom.set_style(input, "border-color", border)?;
    }

    match form.char_count {
        Some(count) => {
            dom.set_text_content(b.message_count, &count.text())?;
            dom.set_style(b.message_count, "color", count.color())?;
        }
        None => {
            dom.set_text_content(b.message_count, "")?;
            dom.set_style(b.message_count, "color", "")?;
        }
    }

    if let Some(text) = form.success_text {
        dom.set_text_content(b.form_success, text)?;
    }
    let display = if form.success_visible { "block" } else { "none" };
    dom.set_style(b.form_success, "display", display)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faq_label_swaps_first_glyph_only() {
        assert_eq!(faq_label("▶ Shipping?", true), "▼ Shipping?");
        assert_eq!(faq_label("▼ Shipping?", false), "▶ Shipping?");
        assert_eq!(faq_label("▼ Shipping?", true), "▼ Shipping?");
        assert_eq!(faq_label("Returns?", true), "Returns?");
        assert_eq!(faq_label("▶ a ▶ b", true), "▼ a ▶ b");
    }
}
