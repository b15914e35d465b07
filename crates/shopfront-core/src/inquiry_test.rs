use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;
use crate::test_support::product;

fn at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 18)
        .and_then(|d| d.and_hms_opt(15, 4, 5))
        .unwrap()
}

fn lamp() -> Product {
    let mut p = product("lamp-1", dec!(999), Some(dec!(33)), 1);
    p.name = "Brass Lamp".to_string();
    p
}

#[test]
fn default_message_names_the_product() {
    assert_eq!(
        default_message("Brass Lamp"),
        "I'm interested in Brass Lamp. Please provide more details."
    );
}

#[test]
fn prefilled_form_uses_session_identity() {
    let form = InquiryForm::prefilled(&lamp(), Some("Asha"), None);
    assert_eq!(form.user_name, "Asha");
    assert_eq!(form.user_email, "");
    assert!(form.message.starts_with("I'm interested in Brass Lamp"));
}

#[test]
fn validation_reports_message_before_name_before_number() {
    let empty = InquiryForm::default();
    assert_eq!(
        empty.validate(""),
        Err(InquiryValidationError::EmptyMessage)
    );

    let no_name = InquiryForm {
        message: "hi".to_string(),
        user_name: "   ".to_string(),
        ..InquiryForm::default()
    };
    assert_eq!(no_name.validate(""), Err(InquiryValidationError::EmptyName));

    let complete = InquiryForm {
        message: "hi".to_string(),
        user_name: "Asha".to_string(),
        ..InquiryForm::default()
    };
    assert_eq!(
        complete.validate(" "),
        Err(InquiryValidationError::NumberNotConfigured)
    );
    assert_eq!(complete.validate("+91 98765 43210"), Ok(()));
}

#[test]
fn request_drops_empty_optional_fields() {
    let form = InquiryForm {
        message: "hi".to_string(),
        user_name: "Asha".to_string(),
        user_email: String::new(),
        user_phone: "98765".to_string(),
    };
    let request = form.to_request("lamp-1");
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["productId"], "lamp-1");
    assert_eq!(json["userPhone"], "98765");
    assert!(json.get("userEmail").is_none());
}

#[test]
fn message_follows_template_and_skips_missing_contact_lines() {
    let form = InquiryForm {
        message: "Is this in stock?".to_string(),
        user_name: "Asha".to_string(),
        user_email: "asha@example.com".to_string(),
        user_phone: String::new(),
    };
    let message = compose_message(&form, &lamp(), "https://shop.example/", &at());

    let expected = "\u{1f6cd}\u{fe0f} *New Product Inquiry*\n\n\
*Customer Details:*\n\
Name: Asha\n\
Email: asha@example.com\n\
\n*Product Details:*\n\
Product: Brass Lamp\n\
Price: \u{20b9}669.33\n\
Product Link: https://shop.example/products/lamp-1\n\
\n*Customer Message:*\n\
Is this in stock?\n\
\n*Date:* 18/10/2026, 3:04:05 pm";
    assert_eq!(message, expected);
}

#[test]
fn en_in_date_does_not_pad_day_month_or_hour() {
    let early = NaiveDate::from_ymd_opt(2024, 1, 5)
        .and_then(|d| d.and_hms_opt(9, 4, 5))
        .unwrap();
    assert_eq!(format_en_in(&early), "5/1/2024, 9:04:05 am");

    let midnight = NaiveDate::from_ymd_opt(2024, 12, 31)
        .and_then(|d| d.and_hms_opt(0, 0, 9))
        .unwrap();
    assert_eq!(format_en_in(&midnight), "31/12/2024, 12:00:09 am");
}

#[test]
fn whatsapp_url_strips_phone_and_encodes_like_uri_component() {
    let url = whatsapp_url("+91 (987) 654-3210", "Hi there! a&b=c (ok)");
    assert_eq!(
        url,
        "https://wa.me/919876543210?text=Hi%20there!%20a%26b%3Dc%20(ok)"
    );
}

#[test]
fn whatsapp_url_encodes_multibyte_characters() {
    let url = whatsapp_url("91", "\u{20b9}5\n");
    assert_eq!(url, "https://wa.me/91?text=%E2%82%B95%0A");
}

#[test]
fn status_transitions_only_move_forward() {
    use InquiryStatus::{Closed, Pending, Responded};
    assert!(Pending.can_transition_to(Responded));
    assert!(Pending.can_transition_to(Closed));
    assert!(Responded.can_transition_to(Closed));
    assert!(!Closed.can_transition_to(Pending));
    assert!(!Responded.can_transition_to(Pending));
    assert!(!Pending.can_transition_to(Pending));
}

#[test]
fn status_parses_lowercase_names() {
    assert_eq!("closed".parse::<InquiryStatus>().ok(), Some(InquiryStatus::Closed));
    assert!("archived".parse::<InquiryStatus>().is_err());
}

#[test]
fn filter_query_pairs_are_camel_case() {
    let filter = InquiryFilter {
        status: Some(InquiryStatus::Pending),
        product_id: Some("p1".to_string()),
        user_id: None,
    };
    assert_eq!(
        filter.query_pairs(),
        vec![
            ("status", "pending".to_string()),
            ("productId", "p1".to_string()),
        ]
    );
}

#[test]
fn inquiry_record_deserializes_with_sparse_fields() {
    let json = serde_json::json!({
        "_id": "ignored",
        "id": "inq-1",
        "productId": "lamp-1",
        "productName": "Brass Lamp",
        "productLink": "https://shop.example/products/lamp-1",
        "productPrice": 669.33,
        "userName": "Asha",
        "message": "hi",
        "status": "responded"
    });
    let inquiry: WhatsAppInquiry = serde_json::from_value(json).unwrap();
    assert_eq!(inquiry.status, InquiryStatus::Responded);
    assert_eq!(inquiry.product_price, dec!(669.33));
    assert!(inquiry.user_email.is_none());
}
