/// How long a notice stays on screen.
pub const NOTICE_TIMEOUT_MS: u32 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    pub fn class_name(self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    pub seq: u64,
}

/// Holds the single visible notice.
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    current: Option<Notice>,
    next_seq: u64,
}

impl Notifier {
    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    /// Replaces whatever is shown. Returns the sequence number the expiry
    /// timer must present to hide this notice.
    pub fn show(&mut self, kind: NoticeKind, text: impl Into<String>) -> u64 {
        self.next_seq += 1;
        self.current = Some(Notice { kind, text: text.into(), seq: self.next_seq });
        self.next_seq
    }

    /// Hides the notice if `seq` is still the one on screen.
    pub fn expire(&mut self, seq: u64) -> bool {
        match &self.current {
            Some(notice) if notice.seq == seq => {
                self.current = None;
                true
            }
            _ => false,
        }
    }
}
