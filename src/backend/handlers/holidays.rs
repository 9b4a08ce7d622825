use axum::response::IntoResponse;

use crate::backend::extract::ApiQuery;
use crate::backend::response::ok;
use crate::backend::validation::HolidayQuery;
use crate::error::Result;
use crate::finance::holidays;

/// Holidays need no owner; the table is the same for everyone.
pub async fn list_holidays(ApiQuery(query): ApiQuery<HolidayQuery>) -> Result<impl IntoResponse> {
    let (year, month) = query.validate()?;
    let list = match month {
        Some(month) => holidays::holidays_in_month(year, month),
        None => holidays::holidays(year),
    };
    Ok(ok(list))
}
