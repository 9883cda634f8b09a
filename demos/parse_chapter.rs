/// Parse Chapter example — a tour of the chapter grammar.
///
/// Parses a small inline chapter and prints every node kind the parser
/// can emit, then decorates one line of rich text.
///
/// Run with: cargo run --example parse_chapter

use vn_script::core::parser::void_log_id;
use vn_script::schema::node::NodeBody;
use vn_script::{decorate, parse_chapter, Locale, Segment};

fn main() {
    let chapter = "\
[[BLUE::RECOVERED FRAGMENT // 07]]

深夜的机房只剩下风扇的声音。
走廊尽头
没有灯。

白栖（笑）：那就有意思了。
Let me take a closer look.

白栖（通信频道）: 频率对上了，别出声。

0600.0Void>>它一直在听。
【插入结束】

[[DANGER::信号源定位失败]]
[[IMAGE::/assets/ch7/terminal.png::终端残影]]
[[JUMP::ch-8::继续下潜]]
";

    let nodes = parse_chapter(chapter, Locale::ZhCn);
    println!("--- {} nodes ---", nodes.len());

    for node in &nodes {
        match &node.body {
            NodeBody::Dialogue {
                display_name,
                emotion,
                text,
                ..
            } => println!("{display_name} [{emotion:?}]: {text}"),
            NodeBody::Narration { text } => println!("~ {text}"),
            NodeBody::System { text } => println!("!! {text}"),
            NodeBody::Image { src, caption } => println!("[img {src}: {caption}]"),
            NodeBody::Comms { speaker, text } => println!("(({speaker})) {text}"),
            NodeBody::Jump { target, label } => println!(">> jump to {target}: {label}"),
            NodeBody::VoidLog { lines } => println!(
                "// intercepted log {} ({} lines)",
                void_log_id(lines).unwrap_or_default(),
                lines.len()
            ),
        }
    }

    println!("\n--- decoration ---");
    for segment in decorate("坐标 [[MASK::38.90, -77.03]] 已被 [[GLITCH_GREEN::覆写]]。") {
        match segment {
            Segment::Text { value } => println!("text: {value}"),
            Segment::Span { style, value } => println!("span {style:?}: {value}"),
        }
    }
}
