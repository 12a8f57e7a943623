use super::*;

#[derive(Debug)]
pub(crate) struct TraceState {
    pub(crate) enabled: bool,
    pub(crate) events: bool,
    pub(crate) timers: bool,
    pub(crate) logs: VecDeque<String>,
    pub(crate) log_limit: usize,
    pub(crate) to_stderr: bool,
}

impl Default for TraceState {
    fn default() -> Self {
        Self {
            enabled: false,
            events: true,
            timers: true,
            logs: VecDeque::new(),
            log_limit: 10_000,
            to_stderr: true,
        }
    }
}

impl TraceState {
    pub(crate) fn event_line(&mut self, line: String) {
        if self.enabled && self.events {
            self.line(line);
        }
    }

    pub(crate) fn timer_line(&mut self, line: String) {
        if self.enabled && self.timers {
            self.line(line);
        }
    }

    pub(crate) fn line(&mut self, line: String) {
        if self.enabled {
            if self.to_stderr {
                eprintln!("{line}");
            }
            if self.logs.len() >= self.log_limit {
                self.logs.pop_front();
            }
            self.logs.push_back(line);
        }
    }
}

/// Stand-ins for `alert()` and `console.log()`.
#[derive(Debug, Default)]
pub(crate) struct PlatformMockState {
    pub(crate) alert_messages: Vec<String>,
    pub(crate) console_messages: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_trace_records_nothing() {
        let mut trace = TraceState::default();
        trace.line("[event] click".into());
        assert!(trace.logs.is_empty());
    }

    #[test]
    fn log_limit_drops_oldest() {
        let mut trace = TraceState {
            enabled: true,
            to_stderr: false,
            log_limit: 2,
            ..TraceState::default()
        };
        trace.line("a".into());
        trace.line("b".into());
        trace.line("c".into());
        assert_eq!(trace.logs, VecDeque::from(vec!["b".to_string(), "c".to_string()]));
    }

    #[test]
    fn category_switches_filter_lines() {
        let mut trace = TraceState {
            enabled: true,
            to_stderr: false,
            timers: false,
            ..TraceState::default()
        };
        trace.timer_line("[timer] run".into());
        trace.event_line("[event] click".into());
        assert_eq!(trace.logs, VecDeque::from(vec!["[event] click".to_string()]));
    }
}
