//! GraphQL documents sent to the metadata service.

/// First page of libraries for every brand.
pub const LIBRARIES: &str = r"
query Libraries($page: Int!, $limit: Int!) {
  brands {
    id
    name
    libraries(limit: $limit, page: $page) {
      items {
        id
        name
        customMetadataProperties {
          id
        }
      }
      hasNextPage
    }
  }
}
";

/// A further page of one brand's libraries.
pub const BRAND_LIBRARY_PAGE: &str = r"
query BrandLibraryPage($brand: ID!, $page: Int!, $limit: Int!) {
  brand(id: $brand) {
    libraries(limit: $limit, page: $page) {
      items {
        id
        name
        customMetadataProperties {
          id
        }
      }
      hasNextPage
    }
  }
}
";

/// Field definitions of one library, with options for choice types.
pub const LIBRARY_FIELDS: &str = r"
query LibraryMetadataFields($libraryId: ID!) {
  library(id: $libraryId) {
    customMetadataProperties {
      id
      name
      type {
        name
        ... on CustomMetadataPropertyTypeSelect {
          options {
            id
            value
          }
        }
        ... on CustomMetadataPropertyTypeMultiSelect {
          options {
            id
            value
          }
        }
      }
    }
  }
}
";

/// Creates a field in a library.
pub const CREATE_PROPERTY: &str = r"
mutation CreateMetadataProperty($input: CreateCustomMetadataPropertyInput!) {
  createCustomMetadataProperty(input: $input) {
    property {
      id
    }
  }
}
";

/// Appends options to a choice-typed field.
pub const ADD_PROPERTY_OPTIONS: &str = r"
mutation AddMetadataPropertyOptions($input: AddCustomMetadataPropertyOptionsInput!) {
  addCustomMetadataPropertyOptions(input: $input) {
    customMetadataProperty {
      id
      name
    }
  }
}
";
