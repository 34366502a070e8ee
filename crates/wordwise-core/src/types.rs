use wordwise_translator::TranslateError;

use crate::feedback::CopyTicket;
use crate::selection::PickerSide;
use crate::session::LookupPayload;
use crate::view::{CopyKey, ResultTab};

#[derive(Debug)]
pub enum AppEvent {
    InputChanged(String),
    Submit,
    LookupFinished {
        generation: u64,
        outcome: Result<LookupPayload, TranslateError>,
    },
    TogglePicker(PickerSide),
    SearchLanguages {
        side: PickerSide,
        query: String,
    },
    SelectLanguage {
        side: PickerSide,
        code: String,
    },
    Swap,
    SelectTab(ResultTab),
    Copy(CopyKey),
    CopyExpired(CopyTicket),
    Clear,
    ShowHistory,
    RecallHistory(usize),
    ShowState,
    Help,
    Quit,
}
