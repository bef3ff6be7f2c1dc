use crate::actor_framework::{Entity, FrameworkError};
use crate::domain::{Product, ProductCreate};

impl Entity for Product {
    type Id = String;
    type CreateParams = ProductCreate;
    type Patch = (); // Catalog entries are immutable
    type Action = ();
    type ActionResult = ();

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create_params(id: String, params: ProductCreate) -> Result<Self, FrameworkError> {
        if params.name.trim().is_empty() {
            return Err(FrameworkError::Validation("product name is required".into()));
        }
        Ok(Self {
            id,
            name: params.name,
            category: params.category,
            shop: params.shop,
        })
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), FrameworkError> {
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), FrameworkError> {
        Ok(())
    }
}
