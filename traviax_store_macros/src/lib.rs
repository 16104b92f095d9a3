mod entity;

use proc_macro::TokenStream;

/// Derive macro implementing `traviax_store::Entity` for a typed record view.
///
/// # Usage
///
/// ```ignore
/// #[derive(Clone, Serialize, Deserialize, Entity)]
/// #[entity(collection = "checkins")]
/// struct Checkin {
///     #[entity(id)]
///     pub id: String,
///     pub place_id: String,
///     pub rating: u8,
/// }
/// ```
///
/// - `#[entity(collection = "...")]` sets the collection name.
///   If omitted, defaults to snake_case struct name + "s".
/// - `#[entity(id)]` marks the field used as the record identifier.
///   If omitted, defaults to a field named `id`.
#[proc_macro_derive(Entity, attributes(entity))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);
    entity::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
