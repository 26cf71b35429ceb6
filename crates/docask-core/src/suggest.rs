//! Debounced suggestion feed.
//!
//! Converts the stream of keystrokes in the search input into a throttled
//! sequence of suggestion requests. The shell owns the real timer; this
//! state machine decides what the timer firing means. Two staleness guards
//! apply: a timer token is valid only if it is the most recently armed one,
//! and a response renders only if its query still equals the input value.

/// Minimum input length before suggestions are requested.
pub const MIN_QUERY_LEN: usize = 2;

/// Debounce interval between the last keystroke and the request.
pub const DEBOUNCE_MS: u32 = 300;

/// What the shell must do after a keystroke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputDirective {
    /// Input is below the minimum: clear the panel and cancel any timer.
    Clear,
    /// (Re)arm the debounce timer, cancelling the previously armed one.
    Schedule { token: u64, delay_ms: u32 },
}

/// A suggestion request the shell should issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestRequest {
    pub token: u64,
    pub query: String,
}

/// State machine over the search input's text value.
#[derive(Debug, Default)]
pub struct SuggestFeed {
    value: String,
    armed: Option<u64>,
    next_token: u64,
}

impl SuggestFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current input value as last reported.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Record a keystroke. Every call invalidates the previously armed
    /// timer token, so only the last keystroke in a burst can fire.
    pub fn on_input(&mut self, value: &str) -> InputDirective {
        self.value = value.to_string();
        if self.value.chars().count() < MIN_QUERY_LEN {
            self.armed = None;
            return InputDirective::Clear;
        }
        self.next_token += 1;
        self.armed = Some(self.next_token);
        InputDirective::Schedule {
            token: self.next_token,
            delay_ms: DEBOUNCE_MS,
        }
    }

    /// The debounce timer fired. Returns the request to issue, or `None`
    /// when the token was superseded or cancelled since it was armed.
    pub fn timer_fired(&mut self, token: u64) -> Option<SuggestRequest> {
        if self.armed != Some(token) {
            return None;
        }
        self.armed = None;
        Some(SuggestRequest {
            token,
            query: self.value.clone(),
        })
    }

    /// Whether a completed request may render. A response for an older
    /// query value must never overwrite a newer one.
    pub fn should_render(&self, request: &SuggestRequest) -> bool {
        request.query == self.value
    }

    /// Adopt a value without scheduling, used when a suggestion is picked:
    /// the input changes programmatically and no new fetch should follow.
    pub fn sync(&mut self, value: &str) {
        self.value = value.to_string();
        self.armed = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn schedule_token(directive: InputDirective) -> u64 {
        match directive {
            InputDirective::Schedule { token, .. } => token,
            InputDirective::Clear => panic!("expected Schedule, got Clear"),
        }
    }

    #[test]
    fn short_input_clears_and_never_schedules() {
        let mut feed = SuggestFeed::new();
        assert_eq!(feed.on_input(""), InputDirective::Clear);
        assert_eq!(feed.on_input("c"), InputDirective::Clear);
    }

    #[test]
    fn two_characters_schedule_with_debounce_delay() {
        let mut feed = SuggestFeed::new();
        match feed.on_input("ca") {
            InputDirective::Schedule { delay_ms, .. } => assert_eq!(delay_ms, DEBOUNCE_MS),
            InputDirective::Clear => panic!("expected Schedule"),
        }
    }

    #[test]
    fn burst_of_keystrokes_fires_at_most_once_with_last_value() {
        let mut feed = SuggestFeed::new();
        let t1 = schedule_token(feed.on_input("ca"));
        let t2 = schedule_token(feed.on_input("cat"));
        let t3 = schedule_token(feed.on_input("cats"));

        // Earlier timers were cancelled by rearming; even if the shell
        // races and delivers them, they are rejected here.
        assert_eq!(feed.timer_fired(t1), None);
        assert_eq!(feed.timer_fired(t2), None);

        let request = feed.timer_fired(t3).unwrap();
        assert_eq!(request.query, "cats");
    }

    #[test]
    fn token_fires_only_once() {
        let mut feed = SuggestFeed::new();
        let token = schedule_token(feed.on_input("ca"));
        assert!(feed.timer_fired(token).is_some());
        assert_eq!(feed.timer_fired(token), None);
    }

    #[test]
    fn shrinking_below_minimum_cancels_the_armed_timer() {
        let mut feed = SuggestFeed::new();
        let token = schedule_token(feed.on_input("ca"));
        assert_eq!(feed.on_input("c"), InputDirective::Clear);
        assert_eq!(feed.timer_fired(token), None);
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut feed = SuggestFeed::new();
        let t_a = schedule_token(feed.on_input("ca"));
        let request_a = feed.timer_fired(t_a).unwrap();

        // User keeps typing while request A is in flight.
        let t_b = schedule_token(feed.on_input("cab"));
        let request_b = feed.timer_fired(t_b).unwrap();

        assert!(!feed.should_render(&request_a));
        assert!(feed.should_render(&request_b));
    }

    #[test]
    fn response_for_current_value_renders() {
        let mut feed = SuggestFeed::new();
        let token = schedule_token(feed.on_input("cat"));
        let request = feed.timer_fired(token).unwrap();
        assert!(feed.should_render(&request));
    }

    #[test]
    fn sync_disarms_and_discards_in_flight_responses() {
        let mut feed = SuggestFeed::new();
        let t1 = schedule_token(feed.on_input("ca"));
        let in_flight = feed.timer_fired(t1).unwrap();

        let t2 = schedule_token(feed.on_input("cat"));
        feed.sync("cat videos");

        assert_eq!(feed.timer_fired(t2), None);
        assert!(!feed.should_render(&in_flight));
        assert_eq!(feed.value(), "cat videos");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: after any sequence of keystrokes, at most the most
        /// recently issued token can fire, and it carries the final value.
        #[test]
        fn only_last_token_of_a_burst_fires(values in prop::collection::vec("[a-z]{0,8}", 1..20)) {
            let mut feed = SuggestFeed::new();
            let mut tokens = Vec::new();
            for value in &values {
                if let InputDirective::Schedule { token, .. } = feed.on_input(value) {
                    tokens.push(token);
                }
            }

            let last = tokens.last().copied();
            for &token in &tokens {
                let fired = feed.timer_fired(token);
                if Some(token) == last && values.last().unwrap().chars().count() >= MIN_QUERY_LEN {
                    let request = fired.unwrap();
                    prop_assert_eq!(&request.query, values.last().unwrap());
                } else {
                    prop_assert!(fired.is_none());
                }
            }
        }

        /// Property: queries below the minimum length never schedule.
        #[test]
        fn short_queries_never_schedule(value in "[a-z]{0,1}") {
            let mut feed = SuggestFeed::new();
            prop_assert_eq!(feed.on_input(&value), InputDirective::Clear);
        }

        /// Property: a response renders iff its query equals the final value.
        #[test]
        fn render_decision_tracks_value_equality(
            first in "[a-z]{2,8}",
            second in "[a-z]{2,8}",
        ) {
            let mut feed = SuggestFeed::new();
            let token = match feed.on_input(&first) {
                InputDirective::Schedule { token, .. } => token,
                InputDirective::Clear => unreachable!(),
            };
            let request = feed.timer_fired(token).unwrap();

            feed.on_input(&second);
            prop_assert_eq!(feed.should_render(&request), first == second);
        }
    }
}
