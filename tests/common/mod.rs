#![allow(dead_code)]

use std::path::PathBuf;
use tempfile::TempDir;

/// Schema exercising every artifact table
pub const USER_SERVICE: &str = r#"
package: demo.v1
services:
  - name: UserService
    methods:
      - name: GetUser
        input_type: GetUserRequest
        output_type: User
        extensions:
          http: { get: "/users/{user_id}" }
      - name: DownloadFile
        input_type: DownloadRequest
        output_type: User
        extensions:
          http: { get: "/files/{file_path=**}" }
      - name: ListUsers
        input_type: ListUsersRequest
        output_type: User
        extensions:
          http: { get: "/api/{version=v1}/users" }
      - name: CreateUser
        input_type: CreateUserRequest
        output_type: User
        extensions:
          http: { post: "/users", body: "*" }
      - name: SyncUsers
        input_type: ListUsersRequest
        output_type: User
        extensions:
          extra:
            - { key: cmd, text: "/user/sync" }
            - { key: labels, map: { team: core } }
messages:
  - name: GetUserRequest
    extensions: { default_location: QUERY }
    fields:
      - { name: user_id, number: 1, type: string, extensions: { location: URI } }
      - { name: fields, number: 2, type: string, label: repeated }
  - name: DownloadRequest
    fields:
      - { name: file_path, number: 1, type: string }
  - name: ListUsersRequest
    oneofs:
      - name: auth
        extensions: { default_location: HEADER, default_auto_tags: 'vd:"len($)>0"' }
    fields:
      - { name: page, number: 1, type: int32 }
      - { name: api_key, number: 2, type: string, oneof: auth }
  - name: CreateUserRequest
    fields:
      - { name: name, number: 1, type: string }
      - { name: role, number: 2, type_name: Role }
  - name: User
    fields:
      - { name: id, number: 1, type: string }
enums:
  - name: Role
    values:
      - { name: MEMBER, number: 0 }
      - { name: ADMIN, number: 1 }
  - name: ErrorReason
    extensions: { default_status: 500 }
    values:
      - { name: USER_NOT_FOUND, number: 1, extensions: { status: 404, reason: NOT_FOUND } }
      - { name: UNKNOWN_ERROR, number: 2 }
"#;

/// Write `content` as `name` inside a fresh temporary directory
pub fn write_schema(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write schema");
    (dir, path)
}
