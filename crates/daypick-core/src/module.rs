//! Module registry: the closed set of daily-content modules, their prompt
//! templates, and their static fallback pools.
//!
//! Everything here is defined at process start and read-only afterwards, so
//! it is safely shared across concurrent requests.

use lazy_static::lazy_static;
use rand::Rng;
use serde_json::{json, Value};

/// One category of daily-generated content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleKind {
    Comfort,
    Invest,
    Song,
    JpWord,
    KrWord,
    EnWord,
}

impl ModuleKind {
    pub const ALL: [ModuleKind; 6] = [
        ModuleKind::Comfort,
        ModuleKind::Invest,
        ModuleKind::Song,
        ModuleKind::JpWord,
        ModuleKind::KrWord,
        ModuleKind::EnWord,
    ];

    /// Parse a wire-format module key. Unknown keys return `None`; the
    /// orchestrator rejects them before any other component runs.
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "comfort" => Some(Self::Comfort),
            "invest" => Some(Self::Invest),
            "song" => Some(Self::Song),
            "jp_word" => Some(Self::JpWord),
            "kr_word" => Some(Self::KrWord),
            "en_word" => Some(Self::EnWord),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Comfort => "comfort",
            Self::Invest => "invest",
            Self::Song => "song",
            Self::JpWord => "jp_word",
            Self::KrWord => "kr_word",
            Self::EnWord => "en_word",
        }
    }

    /// Strict modules surface upstream unavailability as an error instead of
    /// masking it with a fallback. Silently substituting a fixed word would
    /// defeat the word-of-the-day modules' purpose.
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::JpWord | Self::KrWord)
    }
}

impl std::fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the generation instruction for a module. Every prompt demands a
/// specific JSON shape and ends with a JSON-only directive.
pub fn build_prompt(module: ModuleKind) -> String {
    match module {
        ModuleKind::Comfort => "你是一個善良又務實的生活教練，生成一條今日小挑戰。\n\
             要求：12–30字，以動詞開頭，避免危險、違法、昂貴或醫療建議。\n\
             輸出 JSON：{\"title\":\"今日挑戰\",\"text\":\"...\", \"safety\":\"...\"} 僅回 JSON。"
            .to_string(),
        ModuleKind::Invest => "用國中生也懂的語氣解釋一個股票知識點，不提供投資建議。\n\
             長度 30–60 字，附一個超簡短例子。\n\
             輸出 JSON：{\"title\":\"今日投資小知識\",\"tip\":\"...\", \"example\":\"...\",\"disclaimer\":\"非投資建議\"} 僅回 JSON。"
            .to_string(),
        ModuleKind::Song => "推薦一首當代流行或獨立歌曲。\n\
             輸出 JSON：{\"title\":\"今日一首歌\",\"song\":\"...\",\"artist\":\"...\",\"reason\":\"一句話理由\"} 僅回 JSON。"
            .to_string(),
        ModuleKind::JpWord => "提供一個 N5–N4 難度日文單字（避免最常見單字，例如：ありがとう／おはよう／こんにちは／こんばんは／すみません）。\n\
             輸出 JSON：{\"word\":\"...\", \"reading\":\"...\", \"meaning_zh\":\"...\", \"example\":\"...\"} 僅回 JSON。"
            .to_string(),
        ModuleKind::KrWord => "提供一個 A1–A2 難度韓文單字（避免最常見單字，例如：안녕하세요／감사합니다／미안합니다／사랑해요）。\n\
             輸出 JSON：{\"word\":\"...\", \"reading\":\"...\", \"meaning_zh\":\"...\", \"example\":\"...\"} 僅回 JSON。"
            .to_string(),
        ModuleKind::EnWord => "提供一個 A2–B1 難度的英文單字（避免最基礎單字，例如：good, bad, happy, beautiful, big, small, nice）。\n\
             定義清楚詞性與中文意思，給一個簡潔例句。\n\
             輸出 JSON：{\"word\":\"...\",\"pos\":\"...\",\"meaning_zh\":\"...\",\"example\":\"...\"} 僅回 JSON。"
            .to_string(),
    }
}

lazy_static! {
    static ref COMFORT_FALLBACKS: Vec<Value> = vec![
        json!({ "title": "今日挑戰", "text": "嘗試一家沒吃過的餐廳", "safety": "避免危險或昂貴活動" }),
        json!({ "title": "今日挑戰", "text": "主動稱讚一位同事或同學", "safety": "真誠、具體" }),
        json!({ "title": "今日挑戰", "text": "走不同的路線回家", "safety": "注意安全" }),
    ];
    static ref INVEST_FALLBACKS: Vec<Value> = vec![
        json!({ "title": "今日投資小知識", "tip": "做空是先賣後買，賭價格會下跌。", "example": "股價從100跌到80，回補時賺20。", "disclaimer": "非投資建議" }),
        json!({ "title": "今日投資小知識", "tip": "分散投資可降低單一公司風險。", "example": "持有ETF而非單支股票。", "disclaimer": "非投資建議" }),
    ];
    static ref SONG_FALLBACKS: Vec<Value> = vec![
        json!({ "title": "今日一首歌", "song": "Sprinter", "artist": "Dave & Central Cee", "reason": "節奏抓耳，效率上頭" }),
        json!({ "title": "今日一首歌", "song": "As It Was", "artist": "Harry Styles", "reason": "輕快但帶感慨" }),
    ];
    static ref JP_WORD_FALLBACKS: Vec<Value> = vec![
        json!({ "word": "ありがとう", "reading": "arigatō", "meaning_zh": "謝謝", "example": "ご親切にありがとうございます。" }),
        json!({ "word": "おはよう", "reading": "ohayō", "meaning_zh": "早安", "example": "おはようございます。" }),
        json!({ "word": "すみません", "reading": "sumimasen", "meaning_zh": "不好意思／對不起／謝謝", "example": "すみません、道を教えてください。" }),
        json!({ "word": "大丈夫", "reading": "daijōbu", "meaning_zh": "沒事／沒關係", "example": "大丈夫ですか。" }),
        json!({ "word": "頑張る", "reading": "ganbaru", "meaning_zh": "加油、努力", "example": "明日も頑張りましょう。" }),
    ];
    static ref KR_WORD_FALLBACKS: Vec<Value> = vec![
        json!({ "word": "안녕하세요", "reading": "annyeonghaseyo", "meaning_zh": "您好／你好", "example": "안녕하세요? 만나서 반가워요." }),
        json!({ "word": "감사합니다", "reading": "gamsahamnida", "meaning_zh": "謝謝（正式）", "example": "도와주셔서 감사합니다." }),
        json!({ "word": "괜찮아요", "reading": "gwaenchanayo", "meaning_zh": "沒關係／我可以", "example": "괜찮아요. 걱정하지 마세요." }),
        json!({ "word": "화이팅", "reading": "hwaiting", "meaning_zh": "加油", "example": "오늘도 화이팅!" }),
        json!({ "word": "공부하다", "reading": "gongbu-hada", "meaning_zh": "讀書／學習", "example": "매일 한국어를 공부해요." }),
    ];
    static ref EN_WORD_FALLBACKS: Vec<Value> = vec![
        json!({ "word": "concise", "pos": "adj.", "meaning_zh": "簡潔的", "example": "Keep your email concise." }),
    ];
}

fn fallback_pool(module: ModuleKind) -> &'static [Value] {
    match module {
        ModuleKind::Comfort => &COMFORT_FALLBACKS,
        ModuleKind::Invest => &INVEST_FALLBACKS,
        ModuleKind::Song => &SONG_FALLBACKS,
        ModuleKind::JpWord => &JP_WORD_FALLBACKS,
        ModuleKind::KrWord => &KR_WORD_FALLBACKS,
        ModuleKind::EnWord => &EN_WORD_FALLBACKS,
    }
}

/// Pick a uniformly-random fallback from the module's pool.
///
/// The randomness source is a parameter so tests can assert deterministic
/// selection with a seeded generator.
pub fn pick_fallback_with<R: Rng>(module: ModuleKind, rng: &mut R) -> Value {
    let pool = fallback_pool(module);
    pool[rng.gen_range(0..pool.len())].clone()
}

/// Last-resort payload used when a response must be produced for an unknown
/// module, e.g. on the server-error path.
pub fn generic_fallback() -> Value {
    json!({ "text": "Have a nice day!" })
}
