pub mod categories;
pub mod menu_items;
pub mod orders;
pub mod users;

pub use categories::Entity as Categories;
pub use menu_items::Entity as MenuItems;
pub use orders::Entity as Orders;
pub use users::Entity as Users;
