//! File-driven front end for the httpchop parser.
//!
//! Reads one HTTP message from a file, parses it in place, and prints the
//! pieces: the leading line, one `key: value` line per header, and the body
//! after a blank line. `--response` switches the leading-line grammar from
//! request to status line; `--json` swaps the plain-text rendition for a
//! JSON object with lossy UTF-8 strings.
//!
//! The parser itself never allocates; the owned file buffer here is the
//! whole allocation story.

use std::env;
use std::fs;
use std::process::ExitCode;

use httpchop::{HeaderTable, Request, Response, parse_request, parse_response};
use serde::Serialize;

const USAGE: &str = "usage: httpchop-cli [--response] [--json] <file>";

#[derive(Debug)]
struct Options {
    response: bool,
    json: bool,
    file: String,
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut response = false;
    let mut json = false;
    let mut file = None;

    for arg in args {
        if arg == "--response" {
            response = true;
        } else if arg == "--json" {
            json = true;
        } else if arg.starts_with('-') {
            return Err(format!("unknown flag: {arg}\n{USAGE}"));
        } else if file.is_some() {
            return Err(format!("more than one file given\n{USAGE}"));
        } else {
            file = Some(arg);
        }
    }

    let Some(file) = file else {
        return Err(USAGE.to_string());
    };
    Ok(Options { response, json, file })
}

fn main() -> ExitCode {
    let opts = match parse_args(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = run(&opts) {
        eprintln!("httpchop-cli: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(opts: &Options) -> Result<(), Box<dyn std::error::Error>> {
    let mut raw = fs::read(&opts.file)?;

    if opts.response {
        let res = parse_response(&mut raw)?;
        if opts.json {
            println!("{}", serde_json::to_string_pretty(&JsonResponse::from_parsed(&res))?);
        } else {
            print_response(&res);
        }
    } else {
        let req = parse_request(&mut raw)?;
        if opts.json {
            println!("{}", serde_json::to_string_pretty(&JsonRequest::from_parsed(&req))?);
        } else {
            print_request(&req);
        }
    }
    Ok(())
}

// ============================================================================
// Plain-text rendition
// ============================================================================

fn print_request(req: &Request<'_>) {
    println!(
        "{} {} HTTP/{}",
        String::from_utf8_lossy(req.method()),
        String::from_utf8_lossy(req.path()),
        req.version()
    );
    print_headers_and_body(req.headers());
}

fn print_response(res: &Response<'_>) {
    if res.reason().is_empty() {
        println!("HTTP/{} {}", res.version(), res.code());
    } else {
        println!(
            "HTTP/{} {} {}",
            res.version(),
            res.code(),
            String::from_utf8_lossy(res.reason())
        );
    }
    print_headers_and_body(res.headers());
}

fn print_headers_and_body(table: &HeaderTable<'_>) {
    for entry in table.iter() {
        println!(
            "{}: {}",
            String::from_utf8_lossy(entry.key()),
            String::from_utf8_lossy(entry.value())
        );
    }
    if let Some(body) = table.body() {
        println!();
        println!("{}", String::from_utf8_lossy(body));
    }
}

// ============================================================================
// JSON rendition
// ============================================================================

#[derive(Debug, Serialize)]
struct JsonHeader {
    key: String,
    value: String,
}

#[derive(Debug, Serialize)]
struct JsonRequest {
    method: String,
    path: String,
    version: String,
    headers: Vec<JsonHeader>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<String>,
}

#[derive(Debug, Serialize)]
struct JsonResponse {
    version: String,
    code: u16,
    reason: String,
    headers: Vec<JsonHeader>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<String>,
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn headers_to_json(table: &HeaderTable<'_>) -> Vec<JsonHeader> {
    table
        .iter()
        .map(|entry| JsonHeader { key: lossy(entry.key()), value: lossy(entry.value()) })
        .collect()
}

impl JsonRequest {
    fn from_parsed(req: &Request<'_>) -> Self {
        Self {
            method: lossy(req.method()),
            path: lossy(req.path()),
            version: req.version().as_str().to_string(),
            headers: headers_to_json(req.headers()),
            body: req.body().map(lossy),
        }
    }
}

impl JsonResponse {
    fn from_parsed(res: &Response<'_>) -> Self {
        Self {
            version: res.version().as_str().to_string(),
            code: res.code().as_u16(),
            reason: lossy(res.reason()),
            headers: headers_to_json(res.headers()),
            body: res.body().map(lossy),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
