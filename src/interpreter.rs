use crate::script::{self, Command};
use dynarray::{ArrayError, DEFAULT_CAPACITY, DynamicArray};

/// Settings a [`Session`] starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Initial capacity of the array.
    pub capacity: usize,
    /// Elements per line for `print` without an explicit width.
    pub per_row: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            per_row: 10,
        }
    }
}

/// Runs array scripts against one `DynamicArray<i64>`.
///
/// The array lives as long as the session, so several scripts can be run
/// one after another against the same contents.
pub struct Session {
    array: DynamicArray<i64>,
    per_row: usize,
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self, ArrayError> {
        Ok(Self {
            array: DynamicArray::try_with_capacity(config.capacity)?,
            per_row: config.per_row,
        })
    }

    pub fn array(&self) -> &DynamicArray<i64> {
        &self.array
    }

    /// Parses and executes `source`, returning the transcript.
    ///
    /// Only parse errors abort the run. Container errors become
    /// `error: ...` lines and execution continues with the next command.
    pub fn run(&mut self, source: &str) -> Result<Vec<String>, String> {
        let commands = script::parse(source)?;
        log::info!("running {} commands", commands.len());

        let mut transcript = Vec::new();
        for command in &commands {
            match self.execute(command) {
                Ok(Some(output)) => transcript.push(output),
                Ok(None) => {}
                Err(err) => {
                    log::warn!("{:?} failed: {}", command, err);
                    transcript.push(format!("error: {}", err));
                }
            }
        }
        Ok(transcript)
    }

    /// Executes one command. Mutations produce no output.
    pub fn execute(&mut self, command: &Command) -> Result<Option<String>, ArrayError> {
        log::debug!("{:?} (len={} cap={})", command, self.array.len(), self.array.capacity());

        let output = match *command {
            Command::Push(value) => {
                self.array.push(value)?;
                None
            }
            Command::PushFront(value) => {
                self.array.push_front(value)?;
                None
            }
            Command::Pop => Some(or_empty(self.array.pop())),
            Command::PopFront => Some(or_empty(self.array.pop_front())),
            Command::Insert { index, value } => {
                self.array.insert(index, value)?;
                None
            }
            Command::InsertMany { index, value, count } => {
                self.array.insert_many(index, value, count)?;
                None
            }
            Command::Delete(index) => {
                self.array.remove(index)?;
                None
            }
            Command::DeleteSwap(index) => {
                self.array.swap_remove(index)?;
                None
            }
            Command::DeleteMany { index, count } => {
                self.array.remove_many(index, count)?;
                None
            }
            Command::Get(index) => Some(or_none(self.array.get(index))),
            Command::Last => Some(or_none(self.array.last())),
            Command::Search(value) => Some(match self.array.search(&value) {
                Some(index) => index.to_string(),
                None => "-1".to_string(),
            }),
            Command::Print(per_row) => {
                let per_row = per_row.unwrap_or(self.per_row);
                let rows = self.array.rows(per_row).to_string();
                // 每个 transcript 条目单独成行，去掉整行结尾多余的换行
                Some(rows.trim_end_matches('\n').to_string())
            }
            Command::Info => Some(format!(
                "len={} cap={}",
                self.array.len(),
                self.array.capacity()
            )),
            Command::Clear => {
                self.array.clear();
                None
            }
        };
        Ok(output)
    }
}

fn or_empty(value: Option<i64>) -> String {
    value.map_or_else(|| "empty".to_string(), |v| v.to_string())
}

fn or_none(value: Option<&i64>) -> String {
    value.map_or_else(|| "none".to_string(), |v| v.to_string())
}
