use wordwise_core::selection::PickerSide;
use wordwise_core::types::AppEvent;
use wordwise_core::view::{CopyKey, ResultTab};

pub const HELP: &str = "\
Type a word and press Enter to look it up.
  :input <text>            set the input without submitting
  :submit                  submit the current input
  :from | :to              open/close the source or target picker
  :find <from|to> <query>  search a picker's languages
  :use <from|to> <code>    choose a language (e.g. :use to fr)
  :swap                    swap languages
  :tab <translation|meaning|examples>
  :copy <english|translation|meaning|exampleN|input|output>
  :clear                   clear input and result
  :history                 list past lookups
  :recall <n>              show history entry n again
  :state                   dump the session as JSON
  :help | :quit";

/// Turn one line typed at the prompt into session events.
pub fn parse_line(line: &str) -> Result<Vec<AppEvent>, String> {
    let line = line.trim_end_matches(['\r', '\n']);

    let Some(command) = line.strip_prefix(':') else {
        if line.trim().is_empty() {
            return Ok(Vec::new());
        }
        return Ok(vec![AppEvent::InputChanged(line.to_string()), AppEvent::Submit]);
    };

    let (name, rest) = command
        .trim()
        .split_once(char::is_whitespace)
        .map(|(name, rest)| (name, rest.trim()))
        .unwrap_or((command.trim(), ""));

    let event = match name {
        "input" => AppEvent::InputChanged(rest.to_string()),
        "submit" => AppEvent::Submit,
        "from" => AppEvent::TogglePicker(PickerSide::Source),
        "to" => AppEvent::TogglePicker(PickerSide::Target),
        "find" => {
            let (side, query) = split_side(rest)?;
            AppEvent::SearchLanguages {
                side,
                query: query.to_string(),
            }
        }
        "use" => {
            let (side, code) = split_side(rest)?;
            if code.is_empty() {
                return Err("usage: :use <from|to> <code>".to_string());
            }
            AppEvent::SelectLanguage {
                side,
                code: code.to_string(),
            }
        }
        "swap" => AppEvent::Swap,
        "tab" => AppEvent::SelectTab(rest.parse::<ResultTab>().map_err(|e| e.to_string())?),
        "copy" => AppEvent::Copy(rest.parse::<CopyKey>().map_err(|e| e.to_string())?),
        "clear" => AppEvent::Clear,
        "history" => AppEvent::ShowHistory,
        "recall" => {
            let n: usize = rest
                .parse()
                .map_err(|_| "usage: :recall <n>".to_string())?;
            if n == 0 {
                return Err("history entries are numbered from 1".to_string());
            }
            AppEvent::RecallHistory(n - 1)
        }
        "state" => AppEvent::ShowState,
        "help" | "h" | "?" => AppEvent::Help,
        "quit" | "q" | "exit" => AppEvent::Quit,
        other => return Err(format!("unknown command :{other} (try :help)")),
    };

    Ok(vec![event])
}

fn split_side(rest: &str) -> Result<(PickerSide, &str), String> {
    let (side, tail) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    let side = side.parse::<PickerSide>()?;
    Ok((side, tail.trim()))
}
