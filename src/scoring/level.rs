use serde::Serialize;

use crate::locale::Locale;

/// Qualitative band for a score on the 0-6 scale, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    VeryLow,
    Low,
    SomewhatLow,
    Average,
    High,
    VeryHigh,
}

impl Level {
    pub const ALL: [Level; 6] = [
        Level::VeryLow,
        Level::Low,
        Level::SomewhatLow,
        Level::Average,
        Level::High,
        Level::VeryHigh,
    ];

    pub fn label(self, locale: Locale) -> &'static str {
        match self {
            Level::VeryLow => locale.pick("Very Low", "非常に低い"),
            Level::Low => locale.pick("Low", "低い"),
            Level::SomewhatLow => locale.pick("Somewhat Low", "やや低い"),
            Level::Average => locale.pick("Average", "平均的"),
            Level::High => locale.pick("High", "高い"),
            Level::VeryHigh => locale.pick("Very High", "非常に高い"),
        }
    }

    /// Score range covered by this band, as shown on the About tab.
    pub fn range_label(self) -> &'static str {
        match self {
            Level::VeryLow => "0.0 - 0.9",
            Level::Low => "1.0 - 2.4",
            Level::SomewhatLow => "2.5 - 3.4",
            Level::Average => "3.5 - 4.4",
            Level::High => "4.5 - 5.4",
            Level::VeryHigh => "5.5 - 6.0",
        }
    }
}

/// Band a score. Lower bounds are inclusive; the top band includes 6.0.
pub fn level_of(score: f64) -> Level {
    if score < 1.0 {
        Level::VeryLow
    } else if score < 2.5 {
        Level::Low
    } else if score < 3.5 {
        Level::SomewhatLow
    } else if score < 4.5 {
        Level::Average
    } else if score < 5.5 {
        Level::High
    } else {
        Level::VeryHigh
    }
}

/// Narrative interpretation shown for the overall level.
pub fn interpretation_for(level: Level, locale: Locale) -> &'static str {
    match level {
        Level::VeryLow => locale.pick(
            "Your work engagement is very low. Your energy and motivation for work may be \
             markedly reduced. Consider reviewing your work environment and tasks, talking \
             with your manager or colleagues, or consulting a professional.",
            "ワークエンゲージメントが非常に低い状態です。仕事に対するエネルギーや意欲が\
             著しく低下している可能性があります。職場環境や業務内容の見直し、\
             上司や同僚との対話、専門家への相談を検討することをお勧めします。",
        ),
        Level::Low => locale.pick(
            "Your work engagement is low. To regain vigor and enthusiasm, try revisiting \
             your priorities and start with small goals that give you a sense of achievement.",
            "ワークエンゲージメントが低めの状態です。仕事への活力や熱意を\
             取り戻すために、業務の優先順位の見直しや、達成感を得られる\
             小さな目標設定から始めてみることをお勧めします。",
        ),
        Level::SomewhatLow => locale.pick(
            "Your work engagement is somewhat low. Reconfirming the meaning and rewards of \
             your work and focusing on tasks that use your strengths can raise engagement.",
            "ワークエンゲージメントがやや低い状態です。仕事の意義や\
             やりがいを再確認し、強みを活かせる業務に注力することで、\
             エンゲージメントの向上が期待できます。",
        ),
        Level::Average => locale.pick(
            "Your work engagement is at an average level. While keeping things as they are, \
             look for new challenges or chances to build skills for a more fulfilling \
             work experience.",
            "ワークエンゲージメントは平均的なレベルです。現状を維持しながら、\
             より充実した仕事経験を得るために、新しいチャレンジや\
             スキルアップの機会を探してみてはいかがでしょうか。",
        ),
        Level::High => locale.pick(
            "Your work engagement is high. You feel positive about your work and are full \
             of energy. Remember to take proper rest to keep this good state.",
            "ワークエンゲージメントが高い状態です。仕事に対して\
             ポジティブな感情を持ち、活力に満ちた状態と言えます。\
             この良い状態を維持するために、適度な休息も大切にしてください。",
        ),
        Level::VeryHigh => locale.pick(
            "Your work engagement is very high. You bring strong passion and energy to your \
             work. This is an excellent state, but watch your work-life balance to prevent \
             burnout.",
            "ワークエンゲージメントが非常に高い状態です。仕事に対して\
             強い情熱とエネルギーを持っています。素晴らしい状態ですが、\
             燃え尽き症候群を防ぐため、ワークライフバランスにも注意を払いましょう。",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_interiors() {
        assert_eq!(level_of(0.0), Level::VeryLow);
        assert_eq!(level_of(0.99), Level::VeryLow);
        assert_eq!(level_of(2.0), Level::Low);
        assert_eq!(level_of(3.0), Level::SomewhatLow);
        assert_eq!(level_of(4.0), Level::Average);
        assert_eq!(level_of(5.0), Level::High);
        assert_eq!(level_of(6.0), Level::VeryHigh);
    }

    #[test]
    fn test_lower_bounds_are_inclusive() {
        assert_eq!(level_of(1.0), Level::Low);
        assert_eq!(level_of(2.5), Level::SomewhatLow);
        assert_eq!(level_of(3.5), Level::Average);
        assert_eq!(level_of(4.5), Level::High);
        assert_eq!(level_of(5.5), Level::VeryHigh);
    }

    #[test]
    fn test_just_below_bounds() {
        assert_eq!(level_of(2.4999), Level::Low);
        assert_eq!(level_of(3.4999), Level::SomewhatLow);
        assert_eq!(level_of(5.4999), Level::High);
    }

    #[test]
    fn test_levels_are_monotonic() {
        let mut previous = Level::VeryLow;
        for step in 0..=600 {
            let level = level_of(step as f64 / 100.0);
            assert!(level >= previous);
            previous = level;
        }
    }

    #[test]
    fn test_every_level_has_text() {
        for level in Level::ALL {
            assert!(!interpretation_for(level, Locale::En).is_empty());
            assert!(!interpretation_for(level, Locale::Ja).is_empty());
            assert!(!level.label(Locale::Ja).is_empty());
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(Level::SomewhatLow.label(Locale::En), "Somewhat Low");
        assert_eq!(Level::VeryHigh.label(Locale::Ja), "非常に高い");
    }

    #[test]
    fn test_interpretations_are_distinct() {
        let texts: std::collections::HashSet<_> = Level::ALL
            .iter()
            .map(|l| interpretation_for(*l, Locale::En))
            .collect();
        assert_eq!(texts.len(), 6);
    }
}
