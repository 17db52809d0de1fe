const POSITIVE_WORDS: [&str; 9] = [
    "좋", "행운", "기회", "성공", "발전", "상승", "길", "만남", "이익",
];
const NEGATIVE_WORDS: [&str; 6] = ["주의", "조심", "어려움", "갈등", "손실", "하락"];

const NEUTRAL_SCORE: f64 = 3.0;
const WORD_WEIGHT: f64 = 0.5;

/// Rough 1..=5 score of how lucky a fortune text sounds. Each positive
/// keyword present adds half a point and each negative one removes half a
/// point, starting from 3.
///
/// ```
/// use daily_fortune::domain::luck::luck_score;
/// assert_eq!(luck_score(""), 3);
/// assert_eq!(luck_score("좋은 기회가 찾아와요"), 4);
/// ```
pub fn luck_score(text: &str) -> u8 {
    if text.is_empty() {
        return NEUTRAL_SCORE as u8;
    }

    let count = |words: &[&str]| words.iter().filter(|word| text.contains(*word)).count() as f64;
    let score =
        NEUTRAL_SCORE + WORD_WEIGHT * count(&POSITIVE_WORDS) - WORD_WEIGHT * count(&NEGATIVE_WORDS);

    score.round().clamp(1.0, 5.0) as u8
}

pub fn stars(score: u8) -> String {
    "⭐".repeat(score as usize)
}
