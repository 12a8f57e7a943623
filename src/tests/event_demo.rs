use super::*;

#[test]
fn click_demo_updates_output_panel() -> Result<()> {
    let mut page = page()?;
    page.click("#clickDemo")?;
    page.assert_text("#eventOutput", "🎉 Button was clicked!")?;
    page.assert_style("#eventOutput", "background-color", "#e8f5e8")?;
    page.assert_style("#eventOutput", "border-left-color", "#51cf66")?;
    Ok(())
}

#[test]
fn hover_scales_button_and_mouse_out_restores_it() -> Result<()> {
    let mut page = page()?;
    page.assert_style("#hoverDemo", "transform", "")?;

    page.hover("#hoverDemo")?;
    page.assert_text("#eventOutput", "🐭 Mouse is hovering over the button!")?;
    page.assert_style("#hoverDemo", "transform", "scale(1.1)")?;
    page.assert_style("#eventOutput", "border-left-color", "#4a6fa5")?;

    page.mouse_out("#hoverDemo")?;
    page.assert_text("#eventOutput", "👋 Mouse left the button!")?;
    page.assert_style("#hoverDemo", "transform", "scale(1)")?;
    page.assert_style("#eventOutput", "background-color", "#fff3e0")?;
    Ok(())
}

#[test]
fn key_press_reports_key_then_character_count() -> Result<()> {
    let mut page = page()?;
    page.press_key("#keyboardDemo", "a")?;
    page.assert_value("#keyboardDemo", "a")?;
    page.assert_text(
        "#eventOutput",
        "⌨️ Key pressed: a (KeyCode: 65)📝 Character count: 1",
    )?;
    assert!(
        page.dump_dom("#eventOutput")?
            .contains("(KeyCode: 65)<br>📝 Character count: 1")
    );
    page.assert_style("#eventOutput", "background-color", "#f3e5f5")?;

    page.press_key("#keyboardDemo", "b")?;
    page.assert_text(
        "#eventOutput",
        "⌨️ Key pressed: b (KeyCode: 66)📝 Character count: 2",
    )?;
    Ok(())
}

#[test]
fn non_printable_keys_do_not_fire_input() -> Result<()> {
    let mut page = page()?;
    page.press_key("#keyboardDemo", "Enter")?;
    page.assert_text("#eventOutput", "⌨️ Key pressed: Enter (KeyCode: 13)")?;

    page.press_key("#keyboardDemo", "Backspace")?;
    page.assert_text("#eventOutput", "⌨️ Key pressed: Backspace (KeyCode: 8)")?;
    page.assert_value("#keyboardDemo", "")?;
    Ok(())
}

#[test]
fn typed_input_counts_accumulate_on_the_panel() -> Result<()> {
    let mut page = page()?;
    page.type_text("#keyboardDemo", "hello")?;
    page.type_text("#keyboardDemo", "hey")?;
    page.assert_text(
        "#eventOutput",
        "Interact with the elements above to see events in action.📝 Character count: 5📝 Character count: 3",
    )?;

    page.click("#clickDemo")?;
    page.assert_text("#eventOutput", "🎉 Button was clicked!")?;
    Ok(())
}

#[test]
fn dispatch_without_key_reports_unidentified() -> Result<()> {
    let mut page = page()?;
    page.dispatch("#keyboardDemo", "keydown")?;
    page.assert_text("#eventOutput", "⌨️ Key pressed: Unidentified (KeyCode: 0)")?;
    Ok(())
}

#[test]
fn trace_records_events_and_timers() -> Result<()> {
    let mut page = page()?;
    page.enable_trace(true);
    page.set_trace_stderr(false);

    page.click("#incrementBtn")?;
    page.advance_time(200)?;

    let logs = page.take_trace_logs();
    assert!(logs.contains(
        &"[event] click target=#incrementBtn current=#incrementBtn action=IncrementCounter"
            .to_string()
    ));
    assert!(logs.contains(&"[timer] schedule id=1 due_at=200 task=restore-counter-scale".to_string()));
    assert!(logs.contains(
        &"[timer] run id=1 due_at=200 task=restore-counter-scale now_ms=200".to_string()
    ));
    assert!(page.take_trace_logs().is_empty());

    page.set_trace_timers(false);
    page.click("#resetCounter")?;
    let logs = page.take_trace_logs();
    assert!(logs.iter().all(|line| !line.starts_with("[timer]")));
    assert!(logs.iter().any(|line| line.contains("action=ResetCounter")));
    Ok(())
}

#[test]
fn trace_log_limit_rejects_zero() -> Result<()> {
    let mut page = page()?;
    match page.set_trace_log_limit(0) {
        Err(Error::Config(message)) => assert!(message.contains("at least 1")),
        other => panic!("expected limit error, got: {other:?}"),
    }
    page.set_trace_log_limit(1)?;
    page.enable_trace(true);
    page.set_trace_stderr(false);
    page.click("#clickDemo")?;
    assert_eq!(page.take_trace_logs().len(), 1);
    Ok(())
}
