use super::*;

fn fill_valid(page: &mut Storefront) -> Result<()> {
    page.type_text("#name", "Ada Lovelace")?;
    page.type_text("#email", "ada@example.com")?;
    page.type_text("#phone", "(555) 123-4567")?;
    page.type_text("#password", "secret1")?;
    page.type_text("#message", "Hi")?;
    Ok(())
}

#[test]
fn live_validation_sets_and_clears_errors() -> Result<()> {
    let mut page = page()?;
    page.type_text("#email", "bad")?;
    page.assert_text("#emailError", "Please enter a valid email address")?;
    page.assert_style("#email", "border-color", "#ff6b6b")?;

    page.type_text("#email", "a@b.co")?;
    page.assert_text("#emailError", "")?;
    page.assert_style("#email", "border-color", "")?;

    page.type_text("#name", "J")?;
    page.assert_text(
        "#nameError",
        "Name must be 2-50 characters and contain only letters",
    )?;
    page.type_text("#password", "12345")?;
    page.assert_text("#passwordError", "Password must be at least 6 characters long")?;
    page.type_text("#phone", "abc")?;
    page.assert_text("#phoneError", "Please enter a valid phone number")?;
    page.type_text("#phone", "")?;
    page.assert_text("#phoneError", "")?;
    Ok(())
}

#[test]
fn message_count_has_its_own_slot() -> Result<()> {
    let mut page = page()?;
    page.type_text("#message", "hello")?;
    page.assert_text("#messageCount", "5/500 characters")?;
    page.assert_style("#messageCount", "color", "#6c757d")?;
    page.assert_text("#messageError", "")?;

    page.type_text("#message", &"x".repeat(501))?;
    page.assert_text("#messageCount", "Message too long (501/500 characters)")?;
    page.assert_style("#messageCount", "color", "#ff6b6b")?;
    page.assert_text("#messageError", "Message must be less than 500 characters")?;
    Ok(())
}

#[test]
fn valid_submit_resets_form_and_shows_banner_for_five_seconds() -> Result<()> {
    let mut page = page()?;
    fill_valid(&mut page)?;
    page.submit("#contactForm")?;

    assert!(page.is_success_visible());
    page.assert_style("#formSuccess", "display", "block")?;
    page.assert_text(
        "#formSuccess",
        "✅ Thank you! Your message has been sent successfully.",
    )?;
    for field in FormField::ALL {
        page.assert_value(&format!("#{}", field.input_id()), "")?;
        page.assert_text(&format!("#{}", field.error_id()), "")?;
        page.assert_style(&format!("#{}", field.input_id()), "border-color", "")?;
        assert_eq!(page.field_error(field), None);
    }
    page.assert_text("#messageCount", "")?;

    page.advance_time(4999)?;
    page.assert_style("#formSuccess", "display", "block")?;
    page.advance_time(1)?;
    page.assert_style("#formSuccess", "display", "none")?;
    assert!(!page.is_success_visible());
    Ok(())
}

#[test]
fn submit_button_click_submits_the_form() -> Result<()> {
    let mut page = page()?;
    fill_valid(&mut page)?;
    page.enable_trace(true);
    page.set_trace_stderr(false);

    page.click("#submitBtn")?;
    assert!(page.is_success_visible());
    assert!(
        page.take_trace_logs()
            .contains(&"[event] done submit target=#contactForm default_prevented=true".to_string())
    );
    Ok(())
}

#[test]
fn invalid_email_marks_only_email() -> Result<()> {
    let mut page = page()?;
    fill_valid(&mut page)?;
    page.type_text("#email", "nope")?;
    page.submit("#contactForm")?;

    page.assert_text("#emailError", "Valid email is required")?;
    for field in [
        FormField::Name,
        FormField::Phone,
        FormField::Password,
        FormField::Message,
    ] {
        page.assert_text(&format!("#{}", field.error_id()), "")?;
    }
    assert!(!page.is_success_visible());
    page.assert_style("#formSuccess", "display", "none")?;
    page.assert_value("#name", "Ada Lovelace")?;
    assert!(page.pending_timers().is_empty());
    Ok(())
}

#[test]
fn empty_submit_annotates_every_required_field() -> Result<()> {
    let mut page = page()?;
    page.submit("#name")?;

    assert_eq!(
        page.field_error(FormField::Name),
        Some("Name is required (2-50 characters)")
    );
    assert_eq!(page.field_error(FormField::Email), Some("Valid email is required"));
    assert_eq!(page.field_error(FormField::Phone), None);
    assert_eq!(
        page.field_error(FormField::Password),
        Some("Password must be at least 6 characters")
    );
    assert_eq!(page.field_error(FormField::Message), None);
    page.assert_style("#password", "border-color", "#ff6b6b")?;
    Ok(())
}

#[test]
fn typing_into_a_button_is_a_type_mismatch() -> Result<()> {
    let mut page = page()?;
    match page.type_text("#submitBtn", "x") {
        Err(Error::TypeMismatch { actual, .. }) => assert_eq!(actual, "button"),
        other => panic!("expected type mismatch, got: {other:?}"),
    }
    Ok(())
}

#[test]
fn typing_key_by_key_validates_each_keystroke() -> Result<()> {
    let mut page = page()?;
    page.press_key("#password", "a")?;
    assert!(page.field_error(FormField::Password).is_some());
    for key in ["b", "c", "d", "e", "f"] {
        page.press_key("#password", key)?;
    }
    assert_eq!(page.field_value(FormField::Password), "abcdef");
    assert_eq!(page.field_error(FormField::Password), None);
    page.press_key("#password", "Backspace")?;
    assert!(page.field_error(FormField::Password).is_some());
    Ok(())
}

#[test]
fn values_and_validators_are_readable_from_outside() -> Result<()> {
    let mut page = page()?;
    page.type_text("#email", "  ada@example.com ")?;
    assert_eq!(page.value("#email")?, "  ada@example.com ");
    assert!(page.validators().validate_email(&page.value("#email")?));
    assert!(!page.validators().validate(FormField::Phone, "0123"));
    page.assert_text("#emailError", "")?;
    Ok(())
}
