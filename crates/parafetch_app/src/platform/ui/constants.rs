pub const PROMPT: &str = "url> ";
pub const URL_COLUMN_WIDTH: usize = 56;
pub const STATUS_COLUMN_WIDTH: usize = 13;
pub const RULE_WIDTH: usize = 78;
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
