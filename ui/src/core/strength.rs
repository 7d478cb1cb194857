//! Password strength heuristic for the registration and reset forms.
//!
//! One point per passed test, capped at the strongest level. The score is
//! advisory only; the server enforces its own policy.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strength {
    pub score: u8,
    pub message: &'static str,
    /// Bootstrap contextual suffix (`text-<class>`).
    pub class: &'static str,
}

const LEVELS: [(&str, &str); 5] = [
    ("Very weak", "danger"),
    ("Weak", "warning"),
    ("Fair", "info"),
    ("Good", "primary"),
    ("Strong", "success"),
];

pub const MAX_SCORE: u8 = (LEVELS.len() - 1) as u8;

pub fn evaluate(password: &str) -> Strength {
    if password.is_empty() {
        return Strength {
            score: 0,
            message: "No password",
            class: "muted",
        };
    }

    let length = password.chars().count();
    let tests = [
        length >= 8,
        length >= 12,
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];

    let passed = tests.iter().filter(|passed| **passed).count() as u8;
    let score = passed.min(MAX_SCORE);
    let (message, class) = LEVELS[score as usize];

    Strength {
        score,
        message,
        class,
    }
}

impl Strength {
    pub fn meter_class(&self) -> String {
        format!("strength-meter strength-{}", self.score)
    }

    pub fn text_class(&self) -> String {
        format!("text-{}", self.class)
    }
}
