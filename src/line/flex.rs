//! Message object builders for the reply API.
//!
//! Forecast carousels render as a Flex carousel: one bubble per day with
//! the day label in the header, the condition icon as hero, and the
//! temperatures and humidity in the body.

use serde_json::{json, Value};

use crate::models::reply::{DaySummary, ReplyContent};

/// Condition icon URL for a provider icon code.
#[must_use]
pub fn weather_icon_url(icon: &str) -> String {
    format!("https://openweathermap.org/img/w/{icon}.png")
}

/// Build the bubble for one forecast day.
#[must_use]
pub fn day_bubble(day: &DaySummary) -> Value {
    let bucket = &day.bucket;
    json!({
        "type": "bubble",
        "direction": "ltr",
        "header": {
            "type": "box",
            "layout": "baseline",
            "cornerRadius": "xxl",
            "borderColor": "#00bfff",
            "contents": [{
                "type": "text",
                "text": day.label,
                "size": "lg",
                "align": "center",
                "weight": "bold"
            }]
        },
        "hero": {
            "type": "image",
            "url": weather_icon_url(&bucket.icon),
            "size": "xxl",
            "aspectRatio": "1:1",
            "aspectMode": "fit"
        },
        "body": {
            "type": "box",
            "layout": "vertical",
            "borderColor": "#5cd8f7",
            "contents": [
                {
                    "type": "text",
                    "text": format!("最高気温 : {}℃\n", bucket.max_temp),
                    "flex": 1,
                    "size": "xl",
                    "wrap": true,
                    "maxLines": 2
                },
                {
                    "type": "text",
                    "text": format!("最低気温 : {}℃\n", bucket.min_temp),
                    "flex": 1,
                    "size": "xl",
                    "wrap": true,
                    "maxLines": 2
                },
                {
                    "type": "text",
                    "text": format!("湿度 : {:.2} %", bucket.avg_humidity),
                    "flex": 6,
                    "size": "sm",
                    "wrap": true,
                    "maxLines": 10
                }
            ]
        },
        "styles": {
            "header": { "separator": true, "separatorColor": "#2196F3" },
            "hero": { "separator": true, "separatorColor": "#2196F3" },
            "body": { "separator": true, "separatorColor": "#37474F" },
            "footer": { "separator": true, "separatorColor": "#2196F3" }
        }
    })
}

/// Render reply content as a reply-API message object.
#[must_use]
pub fn message_object(content: &ReplyContent) -> Value {
    match content {
        ReplyContent::Text { text } => json!({ "type": "text", "text": text }),
        ReplyContent::Carousel { alt_text, days } => json!({
            "type": "flex",
            "altText": alt_text,
            "contents": {
                "type": "carousel",
                "contents": days.iter().map(day_bubble).collect::<Vec<_>>()
            }
        }),
    }
}
