//! Построчный консольный ввод-вывод поверх `BufRead` / `Write`.
//!
//! Числа и коды мест читаются по словам (как `scanf("%s")`), имя - до конца
//! строки. Конец ввода превращается в `io::ErrorKind::UnexpectedEof`.
//! Байты не в UTF-8 заменяются на `U+FFFD` и дальше не проходят проверки.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::services::CustomerInput;

pub struct Console<R, W> {
    input: R,
    output: W,
    pending: VecDeque<String>,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            pending: VecDeque::new(),
        }
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    pub fn prompt(&mut self, text: &str) -> io::Result<()> {
        write!(self.output, "{}", text)?;
        self.output.flush()
    }

    fn fill_line(&mut self) -> io::Result<String> {
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(String::from_utf8_lossy(&line).into_owned())
    }

    /// Следующее слово ввода; пустые строки пропускаются.
    pub fn next_token(&mut self) -> io::Result<String> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(token);
            }
            let line = self.fill_line()?;
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
    }

    /// Следующее слово как число; `None`, если это не число.
    pub fn next_number(&mut self) -> io::Result<Option<u32>> {
        Ok(self.next_token()?.parse().ok())
    }

    /// Остаток текущей строки или следующая непустая строка целиком.
    pub fn next_text(&mut self) -> io::Result<String> {
        if !self.pending.is_empty() {
            let rest: Vec<String> = self.pending.drain(..).collect();
            return Ok(rest.join(" "));
        }
        loop {
            let line = self.fill_line()?;
            let line = line.trim();
            if !line.is_empty() {
                return Ok(line.to_string());
            }
        }
    }
}

impl<R: BufRead, W: Write> CustomerInput for Console<R, W> {
    fn read_name(&mut self) -> io::Result<String> {
        self.prompt("\nEnter your name: ")?;
        self.next_text()
    }

    fn read_phone(&mut self) -> io::Result<String> {
        self.prompt("Enter your phone number (10 digits): ")?;
        self.next_token()
    }

    fn name_rejected(&mut self, _name: &str) {
        let _ = self.say("Invalid name! Please enter 1 to 50 characters.");
    }

    fn phone_rejected(&mut self, _phone: &str) {
        let _ = self.say("Invalid phone number! Please enter a 10-digit number.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn tokens_span_lines() {
        let mut c = console("1 2\n\n  A1\n");
        assert_eq!(c.next_number().unwrap(), Some(1));
        assert_eq!(c.next_number().unwrap(), Some(2));
        assert_eq!(c.next_token().unwrap(), "A1");
        assert_eq!(
            c.next_token().unwrap_err().kind(),
            io::ErrorKind::UnexpectedEof
        );
    }

    #[test]
    fn non_numeric_token_is_not_a_number() {
        let mut c = console("two\n");
        assert_eq!(c.next_number().unwrap(), None);
    }

    #[test]
    fn name_keeps_spaces_inside_the_line() {
        let mut c = console("\n  Asha   Rao \n");
        assert_eq!(c.next_text().unwrap(), "Asha   Rao");
    }

    #[test]
    fn invalid_utf8_becomes_replacement_token() {
        let mut bytes = b"1\n".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe, b'\n']);
        bytes.extend_from_slice(b"A1\n");
        let mut c = Console::new(Cursor::new(bytes), Vec::new());

        assert_eq!(c.next_number().unwrap(), Some(1));
        let token = c.next_token().unwrap();
        assert_eq!(token, "\u{FFFD}\u{FFFD}");
        assert_eq!(c.next_token().unwrap(), "A1");
    }

    #[test]
    fn phone_prompt_is_written() {
        let mut c = console("9876543210\n");
        assert_eq!(c.read_phone().unwrap(), "9876543210");
        let out = String::from_utf8(c.into_output()).unwrap();
        assert!(out.contains("Enter your phone number (10 digits): "));
    }
}
