/// Preview — parse a chapter file and print the node stream.
///
/// Usage: preview <chapter.txt> [--locale <tag>] [--roster <path>]
///        [--emotions <path>] [--decorate]
///
/// With --decorate, dialogue/narration/system text is additionally run
/// through the inline-tag decorator and printed as segments.

use vn_script::core::decorate::decorate;
use vn_script::core::parser::{clean_void_line, void_log_id, ChapterParser};
use vn_script::schema::locale::Locale;
use vn_script::schema::node::NodeBody;
use vn_script::schema::segment::Segment;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let chapter_path = args[1].clone();
    let mut locale = Locale::ZhCn;
    let mut roster_path = None;
    let mut emotions_path = None;
    let mut show_segments = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--locale" if i + 1 < args.len() => {
                i += 1;
                locale = match Locale::from_tag(&args[i]) {
                    Some(l) => l,
                    None => {
                        eprintln!("Unknown locale tag: {}", args[i]);
                        std::process::exit(1);
                    }
                };
            }
            "--roster" if i + 1 < args.len() => {
                i += 1;
                roster_path = Some(args[i].clone());
            }
            "--emotions" if i + 1 < args.len() => {
                i += 1;
                emotions_path = Some(args[i].clone());
            }
            "--decorate" => {
                show_segments = true;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let raw = match std::fs::read_to_string(&chapter_path) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("ERROR reading {chapter_path}: {e}");
            std::process::exit(1);
        }
    };

    let mut builder = ChapterParser::builder();
    if let Some(path) = roster_path {
        builder = builder.roster_path(path);
    }
    if let Some(path) = emotions_path {
        builder = builder.emotions_path(path);
    }
    let parser = match builder.build() {
        Ok(parser) => parser,
        Err(e) => {
            eprintln!("ERROR loading configuration: {e}");
            std::process::exit(1);
        }
    };

    let nodes = parser.parse(&raw, locale);
    println!("Parsed {} nodes ({})\n", nodes.len(), locale.as_tag());

    for node in &nodes {
        match &node.body {
            NodeBody::Dialogue {
                speaker,
                display_name,
                emotion,
                text,
            } => {
                println!(
                    "[{:>3}] dialogue  {} ({}, {:?})",
                    node.id.0, display_name, speaker.0, emotion
                );
                println!("      {text}");
                if show_segments {
                    print_segments(text);
                }
            }
            NodeBody::Narration { text } => {
                println!("[{:>3}] narration {text}", node.id.0);
                if show_segments {
                    print_segments(text);
                }
            }
            NodeBody::System { text } => {
                println!("[{:>3}] system    {text}", node.id.0);
                if show_segments {
                    print_segments(text);
                }
            }
            NodeBody::Image { src, caption } => {
                println!("[{:>3}] image     {src} ({caption})", node.id.0);
            }
            NodeBody::Comms { speaker, text } => {
                println!("[{:>3}] comms     {speaker}: {text}", node.id.0);
            }
            NodeBody::Jump { target, label } => {
                println!("[{:>3}] jump      -> {target} [{label}]", node.id.0);
            }
            NodeBody::VoidLog { lines } => {
                let id = void_log_id(lines).unwrap_or_else(|| "????".to_string());
                println!("[{:>3}] void_log  // {id} ({} lines)", node.id.0, lines.len());
                for line in lines {
                    let cleaned = clean_void_line(line);
                    if !cleaned.trim().is_empty() {
                        println!("      | {}", cleaned.trim());
                    }
                }
            }
        }
    }
}

fn print_segments(text: &str) {
    for segment in decorate(text) {
        match segment {
            Segment::Text { value } => println!("        text: {value:?}"),
            Segment::Span { style, value } => println!("        span({style:?}): {value:?}"),
        }
    }
}

fn print_usage() {
    println!("Preview — parse a chapter file and print the node stream.");
    println!();
    println!("Usage: preview <chapter.txt> [options]");
    println!();
    println!("  --locale <tag>     Locale tag: zh-CN (default), zh-TW, en");
    println!("  --roster <path>    Speaker roster RON file");
    println!("  --emotions <path>  Emotion cue RON file");
    println!("  --decorate         Also print inline-tag segments");
}
