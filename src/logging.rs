use chrono::{format::DelayedFormat, DateTime, Local, NaiveDate};
use crossbeam_channel::{unbounded, Sender};
use once_cell::sync::Lazy;
use std::{
    fmt::Write as _,
    fs::{self, File, OpenOptions},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    thread,
};

static LOGGER: Lazy<Logger> = Lazy::new(|| Logger::new("gold_quote"));

/// 每個等級各自一個檔案，寫檔交由背景線程處理，呼叫端不會被 I/O 阻塞
pub struct Logger {
    info_writer: Option<Sender<LogMessage>>,
    warn_writer: Option<Sender<LogMessage>>,
    error_writer: Option<Sender<LogMessage>>,
    debug_writer: Option<Sender<LogMessage>>,
}

impl Logger {
    pub fn new(log_name: &str) -> Self {
        Logger {
            info_writer: Self::create_writer(log_name, log::Level::Info),
            warn_writer: Self::create_writer(log_name, log::Level::Warn),
            error_writer: Self::create_writer(log_name, log::Level::Error),
            debug_writer: Self::create_writer(log_name, log::Level::Debug),
        }
    }

    pub fn info(&self, log: String) {
        self.send(&self.info_writer, log::Level::Info, log);
    }

    pub fn warn(&self, log: String) {
        self.send(&self.warn_writer, log::Level::Warn, log);
    }

    pub fn error(&self, log: String) {
        self.send(&self.error_writer, log::Level::Error, log);
    }

    pub fn debug(&self, log: String) {
        self.send(&self.debug_writer, log::Level::Debug, log);
    }

    fn send(&self, writer: &Option<Sender<LogMessage>>, level: log::Level, msg: String) {
        match writer {
            Some(tx) => {
                if let Err(why) = tx.send(LogMessage::new(level, msg)) {
                    error_console(why.to_string());
                }
            }
            // 無法建立檔案時退回到 console
            None => match level {
                log::Level::Error | log::Level::Warn => error_console(msg),
                _ => info_console(msg),
            },
        }
    }

    fn create_writer(log_name: &str, level: log::Level) -> Option<Sender<LogMessage>> {
        let name = format!("{}_{}", log_name, level.as_str().to_lowercase());
        let mut file = match DailyFile::open(&name, Local::now()) {
            Ok(file) => file,
            Err(why) => {
                error_console(format!("Failed to open log file {} because {:?}", name, why));
                return None;
            }
        };

        let (tx, rx) = unbounded::<LogMessage>();

        // 寫入檔案的操作使用另一個線程處理
        thread::spawn(move || {
            let mut line = String::with_capacity(4096);

            for received in &rx {
                if writeln!(
                    &mut line,
                    "{} {} {}",
                    received.created_at.format("%F %X%.6f"),
                    received.level,
                    received.msg
                )
                .is_err()
                {
                    continue;
                }

                if rx.is_empty() || line.len() >= 4096 {
                    let writer = match file.get_writer(Local::now()) {
                        Ok(writer) => writer,
                        Err(why) => {
                            error_console(format!(
                                "Failed to rotate log file. because:{:#?}\r\nmsg:{}",
                                why, line
                            ));
                            line.clear();
                            continue;
                        }
                    };

                    if let Err(why) = writer.write_all(line.as_bytes()) {
                        error_console(format!(
                            "Failed to write to log file. because:{:#?}\r\nmsg:{}",
                            why, line
                        ));
                    }

                    if let Err(why) = writer.flush() {
                        error_console(format!("Failed to flush log file. because:{:#?}", why));
                    }

                    line.clear();
                }
            }
        });

        Some(tx)
    }
}

/// log/%Y-%m-%d_name.log，跨日後換到新的檔案
struct DailyFile {
    name: String,
    date: NaiveDate,
    writer: BufWriter<File>,
}

impl DailyFile {
    fn open(name: &str, now: DateTime<Local>) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(get_log_path(name, now)?)?;

        Ok(DailyFile {
            name: name.to_string(),
            date: now.date_naive(),
            writer: BufWriter::new(file),
        })
    }

    fn get_writer(&mut self, now: DateTime<Local>) -> io::Result<&mut BufWriter<File>> {
        if now.date_naive() != self.date {
            self.writer.flush()?;
            *self = DailyFile::open(&self.name, now)?;
        }

        Ok(&mut self.writer)
    }
}

fn get_log_path(name: &str, now: DateTime<Local>) -> io::Result<PathBuf> {
    let path = Path::new("log");

    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let mut log_path = PathBuf::from(path);
    log_path.push(format!("{}_{}.log", now.format("%Y-%m-%d"), name));

    Ok(log_path)
}

pub struct LogMessage {
    pub level: log::Level,
    pub msg: String,
    pub created_at: DateTime<Local>,
}

impl LogMessage {
    pub fn new(level: log::Level, msg: String) -> Self {
        LogMessage {
            level,
            msg,
            created_at: Local::now(),
        }
    }
}

pub fn info_file_async(log: String) {
    LOGGER.info(log);
}

pub fn warn_file_async(log: String) {
    LOGGER.warn(log);
}

pub fn error_file_async(log: String) {
    LOGGER.error(log);
}

pub fn debug_file_async(log: String) {
    LOGGER.debug(log);
}

pub fn info_console(log: String) {
    println!(
        "{} Info {}",
        Local::now().format("%Y-%m-%d %H:%M:%S.%3f"),
        log
    );
}

pub fn error_console(log: String) {
    println!(
        "{} Error {}",
        DelayedFormat::to_string(&Local::now().format("%Y-%m-%d %H:%M:%S.%3f")),
        log
    );
}
