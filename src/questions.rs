use serde::Serialize;

// A single Likert statement presented as a 1-5 slider. The labels name the
// low and high ends of the slider; the tags name which scorers consume the
// answer.
#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub text: &'static str,
    pub min_label: &'static str,
    pub max_label: &'static str,
    pub tags: &'static [&'static str],
}

// Named indexes into QUESTIONS. Every scoring table below refers to questions
// through these, so reordering the bank is a single-file change.
pub const Q_LAWFUL: usize = 0;
pub const Q_TRADITION: usize = 1;
pub const Q_COMPASSION: usize = 2;
pub const Q_IMPULSE: usize = 3;
pub const Q_SOCIAL: usize = 4;
pub const Q_SECRETS: usize = 5;
pub const Q_PUZZLES: usize = 6;
pub const Q_TEMPER: usize = 7;
pub const Q_EXPLORE: usize = 8;
pub const Q_PEACE: usize = 9;
pub const Q_ENDURANCE: usize = 10;
pub const Q_CHARM: usize = 11;
pub const Q_DEVOTION: usize = 12;
pub const Q_PACT: usize = 13;
pub const Q_MAGIC: usize = 14;
pub const Q_INSTINCT: usize = 15;
pub const Q_TRAINING: usize = 16;
pub const Q_NIMBLE: usize = 17;
pub const Q_WILDS: usize = 18;
pub const Q_HONESTY: usize = 19;

// The question bank is fixed at compile time and index-aligned with every
// answer vector the engine receives.
pub const QUESTIONS: &[Question] = &[
    Question {
        text: "I follow rules and laws without question.",
        min_label: "Chaotic",
        max_label: "Lawful",
        tags: &["lawful", "order"],
    },
    Question {
        text: "I value tradition over innovation.",
        min_label: "Innovative",
        max_label: "Traditional",
        tags: &["tradition", "order"],
    },
    Question {
        text: "Helping others is important to me.",
        min_label: "Selfish",
        max_label: "Altruistic",
        tags: &["good", "compassion"],
    },
    Question {
        text: "I act before I think.",
        min_label: "Cautious",
        max_label: "Impulsive",
        tags: &["impulsive", "reckless"],
    },
    Question {
        text: "I enjoy being the center of attention.",
        min_label: "Reserved",
        max_label: "Charismatic",
        tags: &["social", "charm"],
    },
    Question {
        text: "I keep secrets well.",
        min_label: "Open",
        max_label: "Secretive",
        tags: &["secretive", "stealth"],
    },
    Question {
        text: "I enjoy solving puzzles and riddles.",
        min_label: "Uninterested",
        max_label: "Inquisitive",
        tags: &["intellect", "curiosity"],
    },
    Question {
        text: "I get angry easily.",
        min_label: "Calm",
        max_label: "Hot-headed",
        tags: &["temper", "strength"],
    },
    Question {
        text: "I like exploring the unknown.",
        min_label: "Cautious",
        max_label: "Adventurous",
        tags: &["adventure", "exploration"],
    },
    Question {
        text: "I prefer to avoid conflict.",
        min_label: "Aggressive",
        max_label: "Peaceful",
        tags: &["peace", "calm"],
    },
    Question {
        text: "I can march all day and sleep on stone.",
        min_label: "Frail",
        max_label: "Tireless",
        tags: &["endurance", "grit"],
    },
    Question {
        text: "I am good at charming others.",
        min_label: "Awkward",
        max_label: "Charming",
        tags: &["charm", "persuasion"],
    },
    Question {
        text: "My faith guides my every decision.",
        min_label: "Skeptic",
        max_label: "Devout",
        tags: &["devotion", "faith"],
    },
    Question {
        text: "I would bargain with dangerous powers for strength.",
        min_label: "Wary",
        max_label: "Pact-bound",
        tags: &["pact", "ambition"],
    },
    Question {
        text: "Magic has always come naturally to me.",
        min_label: "Mundane",
        max_label: "Gifted",
        tags: &["innate_magic", "arcane"],
    },
    Question {
        text: "I trust my gut over any book.",
        min_label: "Bookish",
        max_label: "Instinctive",
        tags: &["instinct", "intuition"],
    },
    Question {
        text: "I train my body every day.",
        min_label: "Idle",
        max_label: "Disciplined",
        tags: &["training", "might"],
    },
    Question {
        text: "I am light on my feet.",
        min_label: "Clumsy",
        max_label: "Nimble",
        tags: &["agility", "grace"],
    },
    Question {
        text: "Crowds drain me; the wild restores me.",
        min_label: "Urban",
        max_label: "Wild",
        tags: &["nature", "solitude"],
    },
    Question {
        text: "I am always honest, even if it hurts someone's feelings.",
        min_label: "Diplomatic",
        max_label: "Blunt",
        tags: &["honest", "direct"],
    },
];
