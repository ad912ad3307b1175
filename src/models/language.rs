//! 语言标识与文件扩展名
//!
//! 两张固定表：页面上的语言名 → 规范语言标识；语言标识 → 扩展名

use std::collections::HashMap;

use phf::phf_map;

/// 未识别时使用的语言
pub const DEFAULT_LANGUAGE: &str = "java";

/// 未识别语言的扩展名
pub const DEFAULT_EXTENSION: &str = "txt";

/// 小写语言名 → 规范语言标识
static LANGUAGE_SYNONYMS: phf::Map<&'static str, &'static str> = phf_map! {
    "python" => "python",
    "python3" => "python",
    "java" => "java",
    "javascript" => "javascript",
    "js" => "javascript",
    "typescript" => "typescript",
    "ts" => "typescript",
    "c++" => "cpp",
    "cpp" => "cpp",
    "c" => "c",
    "c#" => "csharp",
    "csharp" => "csharp",
    "go" => "golang",
    "golang" => "golang",
    "rust" => "rust",
    "ruby" => "ruby",
    "php" => "php",
    "swift" => "swift",
    "kotlin" => "kotlin",
    "scala" => "scala",
    "dart" => "dart",
};

/// 语言标识（或别名）→ 扩展名
static LANGUAGE_EXTENSIONS: phf::Map<&'static str, &'static str> = phf_map! {
    "python" => "py",
    "python3" => "py",
    "py" => "py",
    "java" => "java",
    "javascript" => "js",
    "js" => "js",
    "typescript" => "ts",
    "ts" => "ts",
    "c++" => "cpp",
    "cpp" => "cpp",
    "c" => "c",
    "c#" => "cs",
    "csharp" => "cs",
    "cs" => "cs",
    "go" => "go",
    "golang" => "go",
    "rust" => "rs",
    "rs" => "rs",
    "ruby" => "rb",
    "rb" => "rb",
    "php" => "php",
    "swift" => "swift",
    "kotlin" => "kt",
    "kt" => "kt",
    "scala" => "scala",
    "dart" => "dart",
    "elixir" => "ex",
    "ex" => "ex",
    "erlang" => "erl",
    "erl" => "erl",
    "racket" => "rkt",
    "rkt" => "rkt",
};

/// 把页面上读到的语言名映射为规范标识，未识别时返回 `None`
pub fn canonical_language(label: &str) -> Option<&'static str> {
    let key = label.trim().to_lowercase();
    LANGUAGE_SYNONYMS.get(key.as_str()).copied()
}

/// 扩展名表：配置中的覆盖项优先，其次内置表，最后 `txt`
#[derive(Debug, Clone, Default)]
pub struct ExtensionTable {
    overrides: HashMap<String, String>,
}

impl ExtensionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        Self {
            overrides: overrides
                .iter()
                .map(|(lang, ext)| (lang.to_lowercase(), ext.trim_start_matches('.').to_string()))
                .collect(),
        }
    }

    pub fn extension_for(&self, language: &str) -> &str {
        let key = language.trim().to_lowercase();
        if let Some(ext) = self.overrides.get(&key) {
            return ext;
        }
        LANGUAGE_EXTENSIONS
            .get(key.as_str())
            .copied()
            .unwrap_or(DEFAULT_EXTENSION)
    }
}
