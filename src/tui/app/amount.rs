/// The bet-amount text box shown during the human's turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountEntry {
    text: String,
    error: Option<&'static str>,
}

impl AmountEntry {
    const MAX_DIGITS: usize = 12;

    pub fn new(initial: u64) -> Self {
        Self { text: initial.to_string(), error: None }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    pub fn push_digit(&mut self, digit: u8) {
        self.error = None;
        if digit < 10 && self.text.len() < Self::MAX_DIGITS {
            self.text.push(char::from(b'0' + digit));
        }
    }

    pub fn backspace(&mut self) {
        self.error = None;
        self.text.pop();
    }

    /// Move the amount up or down by `step`, treating an empty box as zero.
    pub fn step(&mut self, up: bool, step: u64) {
        self.error = None;
        let cur = self.text.parse::<u64>().unwrap_or(0);
        let next = if up { cur.saturating_add(step) } else { cur.saturating_sub(step) };
        self.text = next.to_string();
    }

    /// The typed amount, or `None` (with the error set) when the box is
    /// empty.
    pub fn value(&mut self) -> Option<u64> {
        let parsed = self.text.parse::<u64>().ok();
        if parsed.is_none() {
            self.error = Some("Enter an amount");
        }
        parsed
    }

    pub fn reject(&mut self) {
        self.error = Some("Bet not accepted");
    }
}
