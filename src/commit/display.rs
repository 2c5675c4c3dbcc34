//! Terminal output: banner, framed messages and the options menu.

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const MAGENTA: &str = "\x1b[35m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

const BANNER: [&str; 6] = [
    "██████╗ ███╗   ███╗██╗████████╗",
    "██╔══██╗████╗ ████║██║╚══██╔══╝",
    "██████╔╝██╔████╔██║██║   ██║   ",
    "██╔══██╗██║╚██╔╝██║██║   ██║   ",
    "██║  ██║██║ ╚═╝ ██║██║   ██║   ",
    "╚═╝  ╚═╝╚═╝     ╚═╝╚═╝   ╚═╝   ",
];

fn paint(color: &str, text: &str) -> String {
    format!("{color}{text}{RESET}")
}

pub fn red(text: &str) -> String {
    paint(RED, text)
}

pub fn green(text: &str) -> String {
    paint(GREEN, text)
}

pub fn yellow(text: &str) -> String {
    paint(YELLOW, text)
}

pub fn blue(text: &str) -> String {
    paint(BLUE, text)
}

pub fn cyan(text: &str) -> String {
    paint(CYAN, text)
}

pub fn rule() -> String {
    paint(MAGENTA, RULE)
}

pub fn print_banner(version: &str) {
    for line in BANNER {
        println!("{}", blue(line));
    }
    println!();
    println!("{} {}", cyan("RMIT"), green(&format!("v{version}")));
    println!("{}", yellow("AI-powered commit message generator"));
    println!("{}", rule());
    println!();
}

pub fn print_model(model: &str) {
    println!("\n{}", rule());
    println!("{} {}", green("🤖 USING MODEL:"), cyan(model));
    println!("{}", rule());
}

/// Print `message` framed under a title such as "GENERATED COMMIT MESSAGE".
pub fn print_message(title: &str, message: &str) {
    println!("\n{}", rule());
    println!("{}", blue(&format!("✨ {title}:")));
    println!("{}", rule());
    println!("\n{}\n", cyan(message));
    println!("{}", rule());
}

pub fn print_options() {
    println!("\n{}", yellow("⚙️  OPTIONS:"));
    println!("{}", rule());
    println!("  {} - Create commit with this message", green("y/yes"));
    println!("  {} - Cancel commit", red("n/no"));
    println!("  {} - Generate more detailed message", blue("g"));
    println!("  {} - Retry with new generation", blue("r"));
    println!("  {} - Summarize message", blue("s"));
    println!("  {} - Provide feedback for the message", blue("p"));
    println!("{}", rule());
}

pub fn print_progress(text: &str) {
    println!("{}", blue(text));
}

pub fn print_invalid_option() {
    println!(
        "{}",
        red(
            "❌ Invalid option. Please choose y (yes), n (no), g (generate detailed), r (retry), s (shorter), or p (custom prompt)."
        )
    );
}
