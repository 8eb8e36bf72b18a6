//! 환영 메일 템플릿
//!
//! 본문은 고정이며 표시 이름만 바뀝니다. 이름은 HTML 이스케이프 후 삽입됩니다.

use crate::domain::entities::users::DEFAULT_DISPLAY_NAME;
use crate::utils::string_utils::escape_html;

pub const WELCOME_SUBJECT: &str = "🎮 Welcome to Sketzo Early Access!";

const NAME_PLACEHOLDER: &str = "{display_name}";

const WELCOME_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <style>
        body { font-family: 'Courier New', monospace; background: #2a2a2a; color: #f0f0f0; padding: 40px; }
        .container { max-width: 600px; margin: 0 auto; background: #3a3a3a; border: 4px solid #5a8a5a; padding: 30px; }
        h1 { color: #7aba7a; font-size: 24px; text-align: center; }
        .pixel-border { border: 2px solid #5a8a5a; padding: 20px; margin: 20px 0; background: #2a4a2a; }
        .emoji { font-size: 32px; text-align: center; display: block; margin: 20px 0; }
        .footer { text-align: center; margin-top: 30px; color: #888; font-size: 12px; }
    </style>
</head>
<body>
    <div class="container">
        <span class="emoji">🌾✨🏠</span>
        <h1>Welcome to Sketzo!</h1>

        <p>Hey {display_name}! 👋</p>

        <div class="pixel-border">
            <p>You're now part of our <strong>Early Access</strong> community!</p>
            <p>As an early member, you'll be among the first to:</p>
            <ul>
                <li>✨ Experience new CAD features</li>
                <li>🎨 Turn your ideas into CAD drawings</li>
                <li>🎮 Shape our product with your feedback</li>
                <li>💫 Get exclusive early access perks</li>
            </ul>
        </div>

        <p>Stay tuned, exciting things are coming your way!</p>

        <p>With pixels and love,<br>
        <strong>The Sketzo Team</strong> 🎮</p>

        <div class="footer">
            <p>© 2026 Sketzo. Made with ♥ and pixels.</p>
        </div>
    </div>
</body>
</html>
"#;

/// 표시 이름을 넣어 환영 메일 HTML을 만듭니다. 빈 이름은 기본 이름으로 바뀝니다.
pub fn render(display_name: &str) -> String {
    let name = match display_name.trim() {
        "" => DEFAULT_DISPLAY_NAME,
        trimmed => trimmed,
    };

    WELCOME_HTML.replace(NAME_PLACEHOLDER, &escape_html(name))
}
