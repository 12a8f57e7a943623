use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub(crate) fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub(crate) fn header_label(self) -> &'static str {
        match self {
            Self::Light => "🌙 Dark",
            Self::Dark => "☀️ Light",
        }
    }

    pub(crate) fn switch_label(self) -> &'static str {
        match self {
            Self::Light => "Switch to Dark Mode",
            Self::Dark => "Switch to Light Mode",
        }
    }
}

/// Color of the counter display. `Plain` means no inline color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CounterTone {
    #[default]
    Plain,
    Warm,
    Hot,
}

impl CounterTone {
    pub(crate) fn css(self) -> &'static str {
        match self {
            Self::Plain => "",
            Self::Warm => "#ffb142",
            Self::Hot => "#ff6b6b",
        }
    }
}

/// Inline `transform` of an element that only ever gets scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Scale {
    #[default]
    Unset,
    Rest,
    Grow,
    Hover,
    Burst,
}

impl Scale {
    pub(crate) fn css(self) -> &'static str {
        match self {
            Self::Unset => "",
            Self::Rest => "scale(1)",
            Self::Hover => "scale(1.1)",
            Self::Grow => "scale(1.2)",
            Self::Burst => "scale(1.5)",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ClickCounter {
    pub(crate) value: BigUint,
    pub(crate) tone: CounterTone,
    pub(crate) scale: Scale,
}

impl ClickCounter {
    fn new() -> Self {
        Self {
            value: BigUint::zero(),
            tone: CounterTone::Plain,
            scale: Scale::Unset,
        }
    }

    pub(crate) fn increment(&mut self) {
        self.value += BigUint::one();
        self.scale = Scale::Grow;
        // Below five the previous color stays.
        if self.value >= BigUint::from(10u32) {
            self.tone = CounterTone::Hot;
        } else if self.value >= BigUint::from(5u32) {
            self.tone = CounterTone::Warm;
        }
    }

    pub(crate) fn reset(&mut self) {
        self.value = BigUint::zero();
        self.tone = CounterTone::Hot;
        self.scale = Scale::Burst;
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Cart {
    pub(crate) items: BigUint,
    pub(crate) highlighted: bool,
}

impl Cart {
    pub(crate) fn add_item(&mut self) {
        self.items += BigUint::one();
        self.highlighted = true;
    }
}

/// FAQ accordion: at most one answer open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Accordion {
    pub(crate) open: Option<usize>,
}

impl Accordion {
    pub(crate) fn select(&mut self, index: usize) {
        self.open = if self.open == Some(index) {
            None
        } else {
            Some(index)
        };
    }
}

/// Tab strip: at most one tab active, selecting is idempotent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TabStrip {
    pub(crate) active: Option<usize>,
}

impl TabStrip {
    pub(crate) fn select(&mut self, index: usize) {
        self.active = Some(index);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputTone {
    Click,
    HoverIn,
    HoverOut,
    Key,
}

impl OutputTone {
    /// `(background-color, border-left-color)`
    pub(crate) fn colors(self) -> (&'static str, &'static str) {
        match self {
            Self::Click => ("#e8f5e8", "#51cf66"),
            Self::HoverIn => ("#e3f2fd", "#4a6fa5"),
            Self::HoverOut => ("#fff3e0", "#ffb142"),
            Self::Key => ("#f3e5f5", "#9b59b6"),
        }
    }
}

/// The shared output panel of the event demos. `None` until the first
/// demo event so the markup's placeholder stays visible.
#[derive(Debug, Clone, Default)]
pub(crate) struct EventOutput {
    pub(crate) lines: Option<Vec<String>>,
    pub(crate) tone: Option<OutputTone>,
}

impl EventOutput {
    pub(crate) fn show(&mut self, message: String, tone: OutputTone) {
        self.lines = Some(vec![message]);
        self.tone = Some(tone);
    }

    pub(crate) fn append(&mut self, note: String) {
        self.lines.get_or_insert_with(Vec::new).push(note);
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct FieldState {
    pub(crate) value: String,
    pub(crate) error: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CharCount {
    Within(usize),
    Over(usize),
}

impl CharCount {
    pub(crate) fn for_message(message: &str) -> Self {
        let len = js_length(message);
        if len > MESSAGE_MAX_LEN {
            Self::Over(len)
        } else {
            Self::Within(len)
        }
    }

    pub(crate) fn text(self) -> String {
        match self {
            Self::Within(len) => format!("{len}/{MESSAGE_MAX_LEN} characters"),
            Self::Over(len) => format!("Message too long ({len}/{MESSAGE_MAX_LEN} characters)"),
        }
    }

    pub(crate) fn color(self) -> &'static str {
        match self {
            Self::Within(_) => "#6c757d",
            Self::Over(_) => "#ff6b6b",
        }
    }
}

pub(crate) const SUCCESS_TEXT: &str = "✅ Thank you! Your message has been sent successfully.";

#[derive(Debug, Clone, Default)]
pub(crate) struct ContactForm {
    pub(crate) fields: [FieldState; 5],
    pub(crate) char_count: Option<CharCount>,
    pub(crate) success_text: Option<&'static str>,
    pub(crate) success_visible: bool,
}

impl ContactForm {
    pub(crate) fn field(&self, field: FormField) -> &FieldState {
        &self.fields[field.index()]
    }

    pub(crate) fn field_mut(&mut self, field: FormField) -> &mut FieldState {
        &mut self.fields[field.index()]
    }

    /// Clears values, errors and the character count after a successful
    /// submit.
    pub(crate) fn reset(&mut self) {
        for field in &mut self.fields {
            *field = FieldState::default();
        }
        self.char_count = None;
    }
}

#[derive(Debug, Clone)]
pub(crate) struct PageState {
    pub(crate) output: EventOutput,
    pub(crate) hover_scale: Scale,
    pub(crate) theme: Theme,
    pub(crate) counter: ClickCounter,
    pub(crate) accordion: Accordion,
    pub(crate) tabs: TabStrip,
    pub(crate) cart: Cart,
    pub(crate) form: ContactForm,
}

impl PageState {
    pub(crate) fn new() -> Self {
        Self {
            output: EventOutput::default(),
            hover_scale: Scale::Unset,
            theme: Theme::Light,
            counter: ClickCounter::new(),
            accordion: Accordion::default(),
            tabs: TabStrip::default(),
            cart: Cart {
                items: BigUint::zero(),
                highlighted: false,
            },
            form: ContactForm::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accordion_reselect_closes() {
        let mut faq = Accordion::default();
        faq.select(1);
        assert_eq!(faq.open, Some(1));
        faq.select(2);
        assert_eq!(faq.open, Some(2));
        faq.select(2);
        assert_eq!(faq.open, None);
    }

    #[test]
    fn tab_strip_select_is_idempotent() {
        let mut tabs = TabStrip::default();
        tabs.select(0);
        tabs.select(0);
        assert_eq!(tabs.active, Some(0));
        tabs.select(3);
        assert_eq!(tabs.active, Some(3));
    }

    #[test]
    fn counter_tone_ladder_keeps_color_below_five() {
        let mut counter = ClickCounter::new();
        for _ in 0..4 {
            counter.increment();
        }
        assert_eq!(counter.tone, CounterTone::Plain);
        counter.increment();
        assert_eq!(counter.tone, CounterTone::Warm);
        for _ in 0..5 {
            counter.increment();
        }
        assert_eq!(counter.tone, CounterTone::Hot);
        counter.reset();
        counter.increment();
        assert_eq!(counter.tone, CounterTone::Hot);
        assert_eq!(counter.value, BigUint::one());
    }

    #[test]
    fn char_count_switches_at_limit() {
        assert_eq!(CharCount::for_message("").text(), "0/500 characters");
        let over = CharCount::for_message(&"x".repeat(501));
        assert_eq!(over.text(), "Message too long (501/500 characters)");
        assert_eq!(over.color(), "#ff6b6b");
    }
}
