/// One line of an array script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Push(i64),
    PushFront(i64),
    Pop,
    PopFront,
    Insert { index: usize, value: i64 },
    InsertMany { index: usize, value: i64, count: usize },
    Delete(usize),
    DeleteSwap(usize),
    DeleteMany { index: usize, count: usize },
    Get(usize),
    Last,
    Search(i64),
    /// Print the array, optionally overriding the configured row width.
    Print(Option<usize>),
    Info,
    Clear,
}

/// Parses a whole script. Errors carry the line and column.
pub fn parse(source: &str) -> Result<Vec<Command>, String> {
    parser::script(source).map_err(|e| e.to_string())
}

peg::parser!(pub grammar parser() for str {
    use super::Command;

    pub rule script() -> Vec<Command>
        = lines:(line() ** "\n") { lines.into_iter().flatten().collect() }

    rule line() -> Option<Command>
        = _ c:command()? _ comment()? _ { c }

    rule command() -> Command
        = "push_front" __ v:value() { Command::PushFront(v) }
        / "push" __ v:value() { Command::Push(v) }
        / "pop_front" { Command::PopFront }
        / "pop" { Command::Pop }
        / "insert_many" __ i:count() __ v:value() __ n:count() {
            Command::InsertMany { index: i, value: v, count: n }
        }
        / "insert" __ i:count() __ v:value() { Command::Insert { index: i, value: v } }
        / "delete_swap" __ i:count() { Command::DeleteSwap(i) }
        / "delete_many" __ i:count() __ n:count() { Command::DeleteMany { index: i, count: n } }
        / "delete" __ i:count() { Command::Delete(i) }
        / "get" __ i:count() { Command::Get(i) }
        / "last" { Command::Last }
        / "search" __ v:value() { Command::Search(v) }
        / "print" n:(__ n:count() { n })? { Command::Print(n) }
        / "info" { Command::Info }
        / "clear" { Command::Clear }

    rule value() -> i64
        = quiet!{ n:$("-"? ['0'..='9']+) {? n.parse().or(Err("i64")) } }
        / expected!("integer value")

    rule count() -> usize
        = quiet!{ n:$(['0'..='9']+) {? n.parse().or(Err("usize")) } }
        / expected!("index or count")

    rule comment() = "#" [^ '\n']*

    rule __() = quiet!{[' ' | '\t']+}

    rule _() = quiet!{[' ' | '\t' | '\r']*}
});
