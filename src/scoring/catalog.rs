//! Fixed UWES-9 item catalog.

use serde::Serialize;

use crate::locale::Locale;

pub const ITEM_COUNT: usize = 9;
pub const MIN_ANSWER: u8 = 0;
pub const MAX_ANSWER: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Subscale {
    Vigor,
    Dedication,
    Absorption,
}

impl Subscale {
    pub const ALL: [Subscale; 3] = [Subscale::Vigor, Subscale::Dedication, Subscale::Absorption];

    pub fn name(self, locale: Locale) -> &'static str {
        match self {
            Subscale::Vigor => locale.pick("Vigor", "活力"),
            Subscale::Dedication => locale.pick("Dedication", "熱意"),
            Subscale::Absorption => locale.pick("Absorption", "没頭"),
        }
    }

    /// One-line description used on the About tab.
    pub fn description(self, locale: Locale) -> &'static str {
        match self {
            Subscale::Vigor => locale.pick(
                "High levels of energy and mental resilience while working",
                "仕事中の高い水準のエネルギーや心理的な回復力",
            ),
            Subscale::Dedication => locale.pick(
                "Strong involvement in work with a sense of significance, enthusiasm and pride",
                "仕事への強い関与、意義・熱意・誇りの感覚",
            ),
            Subscale::Absorption => locale.pick(
                "Being fully concentrated and happily engrossed in work",
                "仕事に集中し、没頭している状態",
            ),
        }
    }

    /// Items belonging to this subscale, in id order.
    pub fn items(self) -> impl Iterator<Item = &'static Item> {
        ITEMS.iter().filter(move |item| item.subscale == self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub id: u8,
    pub subscale: Subscale,
    text_en: &'static str,
    text_ja: &'static str,
}

impl Item {
    pub fn text(&self, locale: Locale) -> &'static str {
        locale.pick(self.text_en, self.text_ja)
    }

    /// Short reference such as "Q5"
    pub fn short_ref(&self) -> String {
        format!("Q{}", self.id)
    }
}

pub static ITEMS: [Item; ITEM_COUNT] = [
    Item {
        id: 1,
        subscale: Subscale::Vigor,
        text_en: "At my work, I feel bursting with energy.",
        text_ja: "仕事をしていると、活力がみなぎるように感じる",
    },
    Item {
        id: 2,
        subscale: Subscale::Vigor,
        text_en: "At my job, I feel strong and vigorous.",
        text_ja: "職場では、元気が出て精力的になるように感じる",
    },
    Item {
        id: 3,
        subscale: Subscale::Dedication,
        text_en: "I am enthusiastic about my job.",
        text_ja: "仕事に熱心である",
    },
    Item {
        id: 4,
        subscale: Subscale::Dedication,
        text_en: "My job inspires me.",
        text_ja: "仕事は、私に活力を与えてくれる",
    },
    Item {
        id: 5,
        subscale: Subscale::Vigor,
        text_en: "When I get up in the morning, I feel like going to work.",
        text_ja: "朝に目がさめると、さあ仕事へ行こう、という気持ちになる",
    },
    Item {
        id: 6,
        subscale: Subscale::Absorption,
        text_en: "I feel happy when I am working intensely.",
        text_ja: "仕事に没頭しているとき、幸せだと感じる",
    },
    Item {
        id: 7,
        subscale: Subscale::Dedication,
        text_en: "I am proud of the work that I do.",
        text_ja: "自分の仕事に誇りを感じる",
    },
    Item {
        id: 8,
        subscale: Subscale::Absorption,
        text_en: "I am immersed in my work.",
        text_ja: "私は仕事にのめり込んでいる",
    },
    Item {
        id: 9,
        subscale: Subscale::Absorption,
        text_en: "I get carried away when I am working.",
        text_ja: "仕事をしていると、つい夢中になってしまう",
    },
];

/// Look up an item by its 1-based id
pub fn item(id: u8) -> Option<&'static Item> {
    ITEMS.iter().find(|item| item.id == id)
}

pub fn is_valid_answer(value: u8) -> bool {
    (MIN_ANSWER..=MAX_ANSWER).contains(&value)
}

/// Frequency label for an answer value ("Often (once a week)").
pub fn answer_label(value: u8, locale: Locale) -> Option<&'static str> {
    let label = match value {
        0 => locale.pick("Never", "全くない"),
        1 => locale.pick("Almost never (a few times a year or less)", "1年に数回以下"),
        2 => locale.pick("Rarely (once a month or less)", "1ヶ月に1回以下"),
        3 => locale.pick("Sometimes (a few times a month)", "1ヶ月に数回"),
        4 => locale.pick("Often (once a week)", "1週間に1回"),
        5 => locale.pick("Very often (a few times a week)", "1週間に数回"),
        6 => locale.pick("Always (every day)", "毎日"),
        _ => return None,
    };
    Some(label)
}
