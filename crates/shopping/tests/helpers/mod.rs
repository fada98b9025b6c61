#![allow(dead_code)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

use larder_shopping::{ParsedIngredient, RecipeContext};

/// Ingredient with quantity and unit, raw text derived from the parts
pub fn measured(quantity: f64, unit: &str, name: &str) -> ParsedIngredient {
    ParsedIngredient::new(format!("{quantity} {unit} {name}"), name)
        .quantity(quantity)
        .unit(unit)
}

/// Ingredient without a usable quantity
pub fn unmeasured(name: &str) -> ParsedIngredient {
    ParsedIngredient::new(name, name)
}

pub fn recipe(title: &str, ingredients: Vec<ParsedIngredient>) -> RecipeContext {
    RecipeContext::new(title, ingredients)
}

/// Answer exactly one HTTP request on a local port, returning the base URL
pub fn serve_once(status: &str, body: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        read_request(&stream);
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
    });

    format!("http://{addr}")
}

/// Consume headers and body so the client is not reset mid-request
fn read_request(stream: &TcpStream) {
    let mut reader = BufReader::new(stream);
    let mut content_length = 0;

    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap_or(0) == 0 {
            return;
        }
        if line == "\r\n" {
            break;
        }
        if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
            content_length = value.trim().parse().unwrap_or(0);
        }
    }

    let mut body = vec![0; content_length];
    let _ = reader.read_exact(&mut body);
}
