use shopfront_client::{ChargeSource, Checkout, CheckoutError, Scope};
use shopfront_core::addresses::{cities_of, pincodes_of, state_names};

use crate::context::{fmt_money, truncate, App};

/// Shipping details as given on the command line.
#[derive(Debug, Clone)]
pub(crate) struct AddressForm {
    pub(crate) name: String,
    pub(crate) address: String,
    pub(crate) state: String,
    pub(crate) city: String,
    pub(crate) zip: String,
    pub(crate) phone: String,
}

/// Warning for a destination outside the address directory. Charges are
/// still computed remotely, so this never blocks checkout.
fn directory_warning(form: &AddressForm) -> Option<String> {
    if !state_names().contains(&form.state.as_str()) {
        return Some(format!("{} is not a listed delivery state", form.state));
    }
    if !cities_of(&form.state).iter().any(|c| c.name == form.city) {
        return Some(format!("{} is not a listed city in {}", form.city, form.state));
    }
    if !pincodes_of(&form.state, &form.city).contains(&form.zip) {
        return Some(format!("{} is not a known pincode for {}", form.zip, form.city));
    }
    None
}

/// Subtotal, charges and final total of a checkout in progress.
pub(crate) fn print_totals(checkout: &Checkout<'_>) {
    let charges = checkout.charges();
    println!("Subtotal:  {}", fmt_money(checkout.subtotal()));
    println!("Packaging: {}", fmt_money(charges.packaging_charge));
    if charges.is_free_delivery {
        println!("Delivery:  FREE");
    } else {
        println!("Delivery:  {}", fmt_money(charges.delivery_charge));
    }
    println!("Total:     {}", fmt_money(checkout.final_total()));
    if checkout.charge_source() == ChargeSource::Fallback {
        println!("(standard charges applied; delivery rates are unavailable)");
    }
}

pub(crate) async fn run_checkout(app: &App, form: &AddressForm, dry_run: bool) -> anyhow::Result<()> {
    let mut cart = app.cart();
    let mut store = app.store(Scope::Storefront);

    let mut checkout = match Checkout::begin(&mut store, &cart) {
        Ok(c) => c,
        Err(CheckoutError::EmptyCart) => {
            println!("your cart is empty; add products with `shopfront cart add`");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(warning) = directory_warning(form) {
        eprintln!("warning: {warning}");
    }

    checkout.set_name(&form.name);
    checkout.set_street_address(&form.address);
    checkout.set_phone(&form.phone);
    checkout.set_state(&form.state).await;
    checkout.set_city(&form.city).await;
    checkout.set_zip_code(&form.zip).await;

    println!("{:<30}{:>5}{:>12}", "PRODUCT", "QTY", "PRICE");
    for item in checkout.items() {
        println!(
            "{:<30}{:>5}{:>12}",
            truncate(&item.product_name, 27),
            item.quantity,
            fmt_money(item.price)
        );
    }
    println!();
    print_totals(&checkout);

    if dry_run {
        return Ok(());
    }
    let prompt = format!(
        "Place order for {}?",
        fmt_money(checkout.final_total())
    );
    if !app.confirm(&prompt)? {
        println!("aborted");
        return Ok(());
    }

    match checkout.submit(app.session.as_ref(), &mut cart).await {
        Ok(order) => {
            println!();
            println!("Order placed: {}", order.order_number);
            println!("Status: {}", order.status);
            println!("Total: {}", fmt_money(order.total_amount));
            Ok(())
        }
        Err(e @ (CheckoutError::IncompleteAddress(_) | CheckoutError::LoginRequired)) => {
            eprintln!("warning: {e}");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::test_support::{lamp, test_app};

    fn form(state: &str, city: &str, zip: &str) -> AddressForm {
        AddressForm {
            name: "Asha".to_string(),
            address: "1 MG Road".to_string(),
            state: state.to_string(),
            city: city.to_string(),
            zip: zip.to_string(),
            phone: "9800000000".to_string(),
        }
    }

    #[test]
    fn listed_destination_has_no_warning() {
        assert_eq!(directory_warning(&form("Maharashtra", "Pune", "411003")), None);
    }

    #[test]
    fn unknown_state_is_reported_first() {
        let warning = directory_warning(&form("Atlantis", "Pune", "000000"));
        assert_eq!(warning.as_deref(), Some("Atlantis is not a listed delivery state"));
    }

    #[test]
    fn city_outside_state_is_reported() {
        let warning = directory_warning(&form("Gujarat", "Pune", "411001"));
        assert_eq!(warning.as_deref(), Some("Pune is not a listed city in Gujarat"));
    }

    #[test]
    fn pincode_outside_city_range_is_reported() {
        let warning = directory_warning(&form("Maharashtra", "Pune", "411006"));
        assert_eq!(warning.as_deref(), Some("411006 is not a known pincode for Pune"));
    }

    #[tokio::test]
    async fn rejected_order_is_returned_as_the_error_and_keeps_the_cart() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/delivery-config/calculate"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/orders"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let app = test_app(&format!("{}/api", server.uri()), dir.path());
        app.cart().add(lamp(), 2).unwrap();

        let err = run_checkout(&app, &form("Maharashtra", "Pune", "411001"), false)
            .await
            .expect_err("a rejected order should fail the command");
        let checkout_err = err
            .downcast_ref::<CheckoutError>()
            .expect("error should be the checkout failure itself");
        assert!(checkout_err.client_error().is_some());
        assert_eq!(app.cart().get("lamp-1").map(|i| i.quantity), Some(2));
    }

    #[tokio::test]
    async fn missing_session_is_a_warning_not_a_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/orders"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&format!("{}/api", server.uri()), dir.path());
        app.session = None;
        app.cart().add(lamp(), 1).unwrap();

        run_checkout(&app, &form("Maharashtra", "Pune", "411001"), false)
            .await
            .expect("login hint should not fail the command");
        assert!(!app.cart().is_empty());
    }
}
