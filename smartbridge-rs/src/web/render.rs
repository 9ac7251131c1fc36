// smartbridge-rs/src/web/render.rs
// Server-side HTML for the two-panel page

use crate::critique::{CritiqueResult, Suggestion};
use crate::prompts::is_blank;

pub const BLANK_REPLY_WARNING: &str = "返信内容を入力してください。";
pub const CRITIQUE_FAILED_MESSAGE: &str = "分析に失敗しました。もう一度お試しください。";

const TRANSLATION_PLACEHOLDER: &str = "相手の言葉を入れるとここに日本語訳が表示されます。";

const CHECK_LABEL: &str = "翻訳してチェック ✨";
const CHECK_BUSY_LABEL: &str = "分析中...";
const TRANSLATING_LABEL: &str = "翻訳中...";
const COPY_LABEL: &str = "コピー";
const COPIED_LABEL: &str = "コピーしました";

/// Debounce delay before the received message is re-translated
pub const TRANSLATE_DEBOUNCE_MS: u64 = 800;

/// Outcome of the "check" action
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CritiqueOutcome {
    /// No check was requested
    #[default]
    NotRequested,
    /// Check requested with a blank reply
    BlankReply,
    /// The analysis did not produce a result
    Failed,
    Ready(CritiqueResult),
}

/// Everything needed to render the page
#[derive(Debug, Clone, Default)]
pub struct PageView {
    pub received: String,
    pub translation: String,
    pub reply: String,
    pub outcome: CritiqueOutcome,
}

/// Escape text for HTML element content and quoted attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn render_page(view: &PageView) -> String {
    let mut html = String::with_capacity(8 * 1024);

    html.push_str(PAGE_HEAD);
    html.push_str("<main class=\"columns\">\n");

    // panel 1
    let translation = if view.translation.is_empty() {
        format!("<p class=\"placeholder\">{}</p>", TRANSLATION_PLACEHOLDER)
    } else {
        format!("<p class=\"translation-text\">{}</p>", escape_html(&view.translation))
    };
    html.push_str(&format!(
        r##"<section class="panel">
<h2>1. 相手のメッセージ (English)</h2>
<textarea id="received" name="received" form="bridge-form" placeholder="英語で入力...">{received}</textarea>
<div class="translation" id="translation">
<div class="caption-row"><span class="caption">日本語訳 (自動)</span><span class="status" id="translate-status"></span><button type="button" class="copy" data-copy-from="#translation .translation-text">{copy}</button></div>
{translation}
</div>
</section>
"##,
        received = escape_html(&view.received),
        copy = COPY_LABEL,
        translation = translation,
    ));

    // panel 2; the submit button stays disabled until the reply has content
    let disabled = if is_blank(&view.reply) { " disabled" } else { "" };
    html.push_str(&format!(
        r#"<section class="panel">
<h2>2. あなたの返信 (日本語)</h2>
<form id="bridge-form" method="post" action="/">
<textarea id="reply" name="reply" placeholder="日本語で入力...">{reply}</textarea>
<input type="hidden" name="action" value="check">
<button type="submit" id="check"{disabled}>{label}</button>
</form>
{outcome}
</section>
"#,
        reply = escape_html(&view.reply),
        disabled = disabled,
        label = CHECK_LABEL,
        outcome = render_outcome(&view.outcome),
    ));

    html.push_str("</main>\n");
    html.push_str(&page_script());
    html.push_str("<footer>Powered by Google Gemini AI</footer>\n</body>\n</html>\n");
    html
}

fn render_outcome(outcome: &CritiqueOutcome) -> String {
    match outcome {
        CritiqueOutcome::NotRequested => String::new(),
        CritiqueOutcome::BlankReply => {
            format!("<div class=\"notice warning\">{}</div>", BLANK_REPLY_WARNING)
        }
        CritiqueOutcome::Failed => {
            format!("<div class=\"notice error\">{}</div>", CRITIQUE_FAILED_MESSAGE)
        }
        CritiqueOutcome::Ready(result) => render_critique(result),
    }
}

/// Clipboard button carrying `text`; nothing for empty text
fn copy_button(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    format!(
        "<button type=\"button\" class=\"copy\" data-copy=\"{}\">{}</button>",
        escape_html(text),
        COPY_LABEL
    )
}

/// Critique card: verdict, prose, English translation, back-translation, alternatives
pub fn render_critique(result: &CritiqueResult) -> String {
    let (class, heading) = if result.is_appropriate() {
        ("critique ok", "✅ 適切な表現です")
    } else {
        ("critique advice", "⚠️ 改善のアドバイス")
    };

    let mut html = format!(
        r#"<div class="{class}">
<h3>{heading}</h3>
<p>{critique}</p>
</div>
<div class="result">
<strong>🇺🇸 英語への翻訳結果:</strong>{copy}
<pre class="translated">{translated}</pre>
<p class="back-translation">🔄 意味の確認 (戻し翻訳): {back}</p>
</div>
"#,
        class = class,
        heading = heading,
        critique = escape_html(result.critique()),
        copy = copy_button(result.translated_text()),
        translated = escape_html(result.translated_text()),
        back = escape_html(result.back_translation()),
    );

    let suggestions = result.suggestions();
    if !suggestions.is_empty() {
        html.push_str("<div class=\"suggestions\">\n<strong>💡 おすすめの別表現:</strong>\n");
        for suggestion in suggestions {
            html.push_str(&render_suggestion(suggestion));
        }
        html.push_str("</div>\n");
    }

    html
}

fn render_suggestion(suggestion: &Suggestion) -> String {
    format!(
        "<div class=\"suggestion-card\">\n<span class=\"label\">{}</span>{}\n<code>{}</code>\n<div class=\"back\">🔄 {}</div>\n</div>\n",
        escape_html(suggestion.label()),
        copy_button(suggestion.text()),
        escape_html(suggestion.text()),
        escape_html(suggestion.back_translation()),
    )
}

fn page_script() -> String {
    format!(
        r#"<script>
(function () {{
  const received = document.getElementById("received");
  const target = document.getElementById("translation");
  const status = document.getElementById("translate-status");
  const reply = document.getElementById("reply");
  const check = document.getElementById("check");
  const placeholder = {placeholder:?};
  let timer = null;

  function show(text) {{
    const p = document.createElement("p");
    p.className = text ? "translation-text" : "placeholder";
    p.textContent = text || placeholder;
    target.replaceChildren(target.firstElementChild, p);
  }}

  received.addEventListener("input", function () {{
    clearTimeout(timer);
    const text = received.value;
    if (!text.trim()) {{
      show("");
      return;
    }}
    timer = setTimeout(async function () {{
      target.classList.add("loading");
      status.textContent = {translating:?};
      try {{
        const res = await fetch("/api/translate", {{
          method: "POST",
          headers: {{ "Content-Type": "application/json" }},
          body: JSON.stringify({{ text: text }})
        }});
        const body = await res.json();
        if (received.value === text) show(body.translatedText);
      }} finally {{
        target.classList.remove("loading");
        status.textContent = "";
      }}
    }}, {delay});
  }});

  reply.addEventListener("input", function () {{
    check.disabled = !reply.value.trim();
  }});

  document.getElementById("bridge-form").addEventListener("submit", function (event) {{
    if (!reply.value.trim()) {{
      event.preventDefault();
      return;
    }}
    check.disabled = true;
    check.textContent = {busy:?};
  }});

  window.addEventListener("pageshow", function () {{
    check.textContent = {label:?};
    check.disabled = !reply.value.trim();
  }});

  document.addEventListener("click", function (event) {{
    const button = event.target.closest("button.copy");
    if (!button || !navigator.clipboard) return;
    let text = button.dataset.copy;
    if (text === undefined) {{
      const source = document.querySelector(button.dataset.copyFrom);
      text = source ? source.textContent : "";
    }}
    if (!text) return;
    navigator.clipboard.writeText(text).then(function () {{
      button.textContent = {copied:?};
      setTimeout(function () {{ button.textContent = {copy:?}; }}, 1500);
    }});
  }});
}})();
</script>
"#,
        placeholder = TRANSLATION_PLACEHOLDER,
        translating = TRANSLATING_LABEL,
        delay = TRANSLATE_DEBOUNCE_MS,
        busy = CHECK_BUSY_LABEL,
        label = CHECK_LABEL,
        copied = COPIED_LABEL,
        copy = COPY_LABEL,
    )
}

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="ja">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>SmartBridge - AI翻訳添削</title>
<style>
body { font-family: system-ui, sans-serif; background: #f8fafc; color: #334155; margin: 0; }
header, main, footer { max-width: 64rem; margin: 0 auto; padding: 1rem 1.5rem; }
.columns { display: grid; grid-template-columns: repeat(auto-fit, minmax(20rem, 1fr)); gap: 2rem; }
.panel h2 { font-size: 0.9rem; text-transform: uppercase; letter-spacing: 0.05em; }
textarea { width: 100%; height: 10rem; padding: 1rem; font-size: 1rem; box-sizing: border-box; }
.translation { background: #f1f5f9; padding: 1rem; min-height: 6rem; white-space: pre-wrap; }
.translation.loading { opacity: 0.6; }
.caption { font-size: 0.75rem; font-weight: bold; color: #64748b; }
.placeholder { color: #94a3b8; }
button:disabled { background: #a5b4fc; cursor: not-allowed; }
.caption-row { display: flex; align-items: center; gap: 0.5rem; }
.status { font-size: 0.75rem; color: #6366f1; }
button.copy { margin: 0 0 0 auto; padding: 0.15rem 0.6rem; font-size: 0.7rem; background: white; color: #4f46e5; border: 1px solid #c7d2fe; }
button { margin-top: 0.75rem; padding: 0.5rem 1.5rem; background: #4f46e5; color: white; border: 0; border-radius: 0.5rem; font-weight: 600; }
.notice { margin-top: 1rem; padding: 0.75rem 1rem; border-radius: 0.5rem; }
.notice.warning { background: #fffbeb; border: 1px solid #f59e0b; }
.notice.error { background: #fef2f2; border: 1px solid #ef4444; }
.critique { margin-top: 1rem; padding: 1rem; border-radius: 0.5rem; }
.critique.ok { background: #ecfdf5; border: 1px solid green; color: #065f46; }
.critique.advice { background: #fffbeb; border: 1px solid orange; color: #92400e; }
.translated { background: white; padding: 1rem; white-space: pre-wrap; }
.back-translation { font-size: 0.8rem; font-style: italic; }
.suggestion-card { background: white; padding: 10px; border-left: 4px solid #6366f1; border-radius: 4px; margin-bottom: 10px; }
.suggestion-card .label { font-size: 0.7rem; font-weight: bold; color: #6366f1; }
.suggestion-card code { display: block; padding: 5px 0; white-space: pre-wrap; }
.suggestion-card .back { font-size: 0.75rem; color: #64748b; font-style: italic; }
footer { color: #94a3b8; font-size: 0.8rem; text-align: center; }
</style>
</head>
<body>
<header>
<h1>🌐 SmartBridge</h1>
<p>AIが「相手の意図」と「あなたのニュアンス」を繋ぐ翻訳添削ツール</p>
</header>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(appropriate: bool) -> CritiqueResult {
        CritiqueResult {
            translated_text: Some("Sure.".to_string()),
            back_translation: Some("了解です。".to_string()),
            is_appropriate: Some(appropriate),
            critique: Some("丁寧です".to_string()),
            suggestions: Some(vec![Suggestion {
                text: Some("Certainly.".to_string()),
                label: Some("より丁寧".to_string()),
                back_translation: Some("かしこまりました。".to_string()),
            }]),
            ..CritiqueResult::default()
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
        assert_eq!(escape_html("こんにちは"), "こんにちは");
    }

    #[test]
    fn test_verdict_heading() {
        assert!(render_critique(&sample(true)).contains("✅ 適切な表現です"));
        let advice = render_critique(&sample(false));
        assert!(advice.contains("⚠️ 改善のアドバイス"));
        assert!(!advice.contains("適切な表現です"));
    }

    #[test]
    fn test_critique_card_lists_suggestions() {
        let html = render_critique(&sample(true));
        assert!(html.contains("🔄 意味の確認 (戻し翻訳): 了解です。"));
        assert!(html.contains("💡 おすすめの別表現"));
        assert!(html.contains("より丁寧"));
        assert!(html.contains("かしこまりました。"));
        assert_eq!(html.matches("class=\"copy\"").count(), 2);
        assert!(html.contains("data-copy=\"Sure.\">コピー</button>"));
        assert!(html.contains("data-copy=\"Certainly.\">コピー</button>"));
    }

    #[test]
    fn test_copy_button_text_is_escaped() {
        let result = CritiqueResult {
            translated_text: Some("Say \"hi\" <now>".to_string()),
            ..CritiqueResult::default()
        };
        let html = render_critique(&result);
        assert!(html.contains("data-copy=\"Say &quot;hi&quot; &lt;now&gt;\""));
    }

    #[test]
    fn test_missing_fields_render_empty() {
        let html = render_critique(&CritiqueResult::default());
        assert!(html.contains("⚠️ 改善のアドバイス"));
        assert!(html.contains("<pre class=\"translated\"></pre>"));
        assert!(!html.contains("class=\"copy\""));
        assert!(!html.contains("おすすめの別表現"));
    }

    #[test]
    fn test_model_text_is_escaped() {
        let result = CritiqueResult {
            critique: Some("<b>bold</b>".to_string()),
            ..CritiqueResult::default()
        };
        let html = render_critique(&result);
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(!html.contains("<b>bold</b>"));
    }

    #[test]
    fn test_page_outcomes() {
        let mut view = PageView {
            received: "Hello".to_string(),
            translation: "こんにちは".to_string(),
            ..PageView::default()
        };
        let html = render_page(&view);
        assert!(html.contains("1. 相手のメッセージ (English)"));
        assert!(html.contains("2. あなたの返信 (日本語)"));
        assert!(html.contains("翻訳してチェック"));
        assert!(html.contains("こんにちは"));
        assert!(html.contains("800"));
        assert!(!html.contains(BLANK_REPLY_WARNING));

        view.outcome = CritiqueOutcome::BlankReply;
        assert!(render_page(&view).contains(BLANK_REPLY_WARNING));

        view.outcome = CritiqueOutcome::Failed;
        assert!(render_page(&view).contains(CRITIQUE_FAILED_MESSAGE));
    }

    #[test]
    fn test_translation_panel_has_copy_button() {
        let html = render_page(&PageView::default());
        assert!(html.contains("data-copy-from=\"#translation .translation-text\""));
        assert!(html.contains("navigator.clipboard.writeText"));
        assert!(html.contains("\"コピーしました\""));
    }

    #[test]
    fn test_check_button_tracks_reply() {
        let mut view = PageView::default();
        let html = render_page(&view);
        assert!(html.contains("<button type=\"submit\" id=\"check\" disabled>翻訳してチェック ✨</button>"));
        assert!(html.contains("<input type=\"hidden\" name=\"action\" value=\"check\">"));

        view.reply = " 　".to_string();
        assert!(render_page(&view).contains("id=\"check\" disabled>"));

        view.reply = "了解です".to_string();
        let html = render_page(&view);
        assert!(html.contains("<button type=\"submit\" id=\"check\">翻訳してチェック ✨</button>"));
        assert!(!html.contains(" disabled>"));
    }

    #[test]
    fn test_script_shows_progress() {
        let html = render_page(&PageView::default());
        assert!(html.contains("check.textContent = \"分析中...\";"));
        assert!(html.contains("status.textContent = \"翻訳中...\";"));
        assert!(html.contains("check.disabled = !reply.value.trim();"));
    }
}
