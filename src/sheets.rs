use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};
use serde::Deserialize;

use crate::firebase;
use crate::routine;
use crate::types::{AuthSession, ExerciseRecord};

const SHEET_NAME: &str = "Sheet1";
// Columns A-G cover day, exercise, target, weight, rest and notes.
const CELL_RANGE: &str = "A1:G100";

#[derive(Clone)]
pub enum RoutineLoad {
    /// No spreadsheet linked yet; route to onboarding.
    NeedsSheetId,
    Ready(Vec<ExerciseRecord>),
}

#[derive(Deserialize)]
struct ValuesResponse {
    values: Option<Vec<Vec<String>>>,
}

/// Full load flow: user's sheet id, then the shared API credential, then the
/// tabular data. Every remote failure past onboarding degrades to an empty
/// routine; nothing here retries.
pub async fn load_routine(session: &AuthSession) -> RoutineLoad {
    let sheet_id = match firebase::fetch_sheet_id(session).await {
        Ok(Some(id)) if !id.trim().is_empty() => id,
        Ok(_) => return RoutineLoad::NeedsSheetId,
        Err(e) => {
            web_sys::console::log_1(&format!("Sheet id fetch failed: {:?}", e).into());
            return RoutineLoad::NeedsSheetId;
        }
    };

    let api_key = match firebase::fetch_sheets_api_key(session).await {
        Ok(Some(key)) => key,
        Ok(None) => {
            web_sys::console::log_1(&"No Sheets API key in config document".into());
            return RoutineLoad::Ready(Vec::new());
        }
        Err(e) => {
            web_sys::console::log_1(&format!("API key fetch failed: {:?}", e).into());
            return RoutineLoad::Ready(Vec::new());
        }
    };

    let rows = match fetch_values(&sheet_id, &api_key).await {
        Ok(rows) => rows,
        Err(e) => {
            web_sys::console::log_1(&format!("Sheet fetch failed: {:?}", e).into());
            Vec::new()
        }
    };

    RoutineLoad::Ready(routine::map_rows(&rows))
}

async fn fetch_values(sheet_id: &str, api_key: &str) -> Result<Vec<Vec<String>>, JsValue> {
    let window = web_sys::window().ok_or("no window")?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let url = format!(
        "https://sheets.googleapis.com/v4/spreadsheets/{}/values/{}!{}?key={}",
        sheet_id, SHEET_NAME, CELL_RANGE, api_key
    );
    let request = Request::new_with_str_and_init(&url, &opts)?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    if !resp.ok() {
        return Err(format!("HTTP error: {}", resp.status()).into());
    }

    let json = JsFuture::from(resp.json()?).await?;
    let parsed: ValuesResponse = serde_wasm_bindgen::from_value(json)?;
    Ok(parsed.values.unwrap_or_default())
}
