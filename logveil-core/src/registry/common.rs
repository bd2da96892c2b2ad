//! Cross-region field names and content patterns. Always active.

use super::{builtin, category, ContentPattern, FieldCategory};
use crate::validators;

/// Common field categories. `secret` must stay first: it is checked before every
/// other category.
pub(super) fn field_categories() -> Vec<FieldCategory> {
    vec![
        FieldCategory::new(
            category::SECRET,
            [
                "password", "passwd", "pwd", "pass", "passphrase", "secret", "client_secret",
                "secret_key", "api_key", "apikey", "api_secret", "access_key", "private_key",
                "token", "access_token", "refresh_token", "id_token", "auth_token", "bearer_token",
                "session_token", "authorization", "credentials", "pin", "otp",
            ],
        ),
        FieldCategory::new(
            category::NAME,
            [
                "name", "full_name", "fullname", "first_name", "firstname", "last_name",
                "lastname", "middle_name", "middlename", "given_name", "family_name", "surname",
                "customer_name", "holder_name", "cardholder_name",
            ],
        ),
        FieldCategory::new(
            category::EMAIL,
            [
                "email", "e_mail", "email_address", "emailaddress", "mail", "user_email",
                "contact_email",
            ],
        ),
        FieldCategory::new(
            category::PHONE,
            [
                "phone", "phone_number", "phonenumber", "phone_no", "mobile", "mobile_number",
                "mobilenumber", "mobile_no", "telephone", "tel", "cell", "cellphone",
                "contact_number", "fax",
            ],
        ),
        FieldCategory::new(
            category::ADDRESS,
            [
                "address", "street", "street_address", "address_line1", "address_line_1",
                "address_line2", "address_line_2", "home_address", "billing_address",
                "shipping_address", "residential_address", "postal_code", "postcode", "zip",
                "zipcode", "zip_code",
            ],
        ),
        FieldCategory::new(
            category::DATE_OF_BIRTH,
            ["dob", "date_of_birth", "dateofbirth", "birth_date", "birthdate", "birthday"],
        ),
        FieldCategory::new(
            category::PASSPORT,
            ["passport", "passport_number", "passportnumber", "passport_no"],
        ),
        FieldCategory::new(
            category::BANK_ACCOUNT,
            [
                "bank_account", "bankaccount", "bank_account_number", "account_number",
                "accountnumber", "account_no", "iban", "routing_number",
            ],
        ),
        FieldCategory::new(
            category::PAYMENT_CARD,
            [
                "card_number", "cardnumber", "card_no", "credit_card", "creditcard",
                "credit_card_number", "cc_number", "pan", "cvv", "cvc", "card_cvv",
            ],
        ),
    ]
}

/// Common content patterns, in evaluation order.
pub(super) fn content_patterns() -> Vec<ContentPattern> {
    vec![
        builtin("email", r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}"),
        builtin("credit_card", r"\b(?:\d[ -]?){12,18}\d\b")
            .with_validator(validators::is_valid_credit_card),
    ]
}
