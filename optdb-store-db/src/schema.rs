// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Bundled database schema.

/// Tables created by [`SCHEMA_SQL`], parents before children.
pub const TABLES: &[&str] = &[
    "models",
    "parameters",
    "sets",
    "variables",
    "data_sets",
    "parameter_data",
    "set_data",
    "solutions",
    "variable_data",
    "files",
    "model_has_file",
    "data_set_has_file",
    "solution_has_file",
];

/// Schema executed by `optdb init` unless a custom script is configured.
pub const SCHEMA_SQL: &str = r#"
create table if not exists models (
    model_id        integer primary key autoincrement not null,
    model_name      text not null,
    model_checksum  text not null,
    model_class     text,
    model_is_convex integer not null default 1,
    description     text,
    unique (model_name, model_checksum)
);

create table if not exists parameters (
    param_id    integer primary key autoincrement not null,
    model_id    integer not null,
    param_name  text not null,
    description text,
    unique (model_id, param_name),
    foreign key (model_id) references models(model_id) on delete cascade
);

create table if not exists sets (
    set_id      integer primary key autoincrement not null,
    model_id    integer not null,
    set_name    text not null,
    description text,
    unique (model_id, set_name),
    foreign key (model_id) references models(model_id) on delete cascade
);

create table if not exists variables (
    var_id      integer primary key autoincrement not null,
    model_id    integer not null,
    var_name    text not null,
    description text,
    unique (model_id, var_name),
    foreign key (model_id) references models(model_id) on delete cascade
);

create table if not exists data_sets (
    data_set_id   integer primary key autoincrement not null,
    data_set_uuid text unique not null,
    model_id      integer not null,
    created_at    text not null default current_timestamp,
    foreign key (model_id) references models(model_id) on delete cascade
);

create table if not exists parameter_data (
    data_set_id integer not null,
    param_id    integer not null,
    index_str   text not null,
    value,
    unique (data_set_id, param_id, index_str),
    foreign key (data_set_id) references data_sets(data_set_id) on delete cascade,
    foreign key (param_id) references parameters(param_id) on delete cascade
);

create table if not exists set_data (
    data_set_id integer not null,
    set_id      integer not null,
    index_str   text not null,
    value       text not null,
    unique (data_set_id, set_id, index_str, value),
    foreign key (data_set_id) references data_sets(data_set_id) on delete cascade,
    foreign key (set_id) references sets(set_id) on delete cascade
);

create table if not exists solutions (
    solution_id   integer primary key autoincrement not null,
    data_set_id   integer not null,
    solution_uuid text unique not null,
    sol_message   text,
    sol_status    text not null,
    objective     real,
    gap           real,
    time_seconds  real,
    foreign key (data_set_id) references data_sets(data_set_id) on delete cascade
);

create table if not exists variable_data (
    solution_id integer not null,
    var_id      integer not null,
    index_str   text not null,
    value       real,
    unique (solution_id, var_id, index_str),
    foreign key (solution_id) references solutions(solution_id) on delete cascade,
    foreign key (var_id) references variables(var_id) on delete cascade
);

create index if not exists IndexParameterData on parameter_data(param_id);
create index if not exists IndexSetData on set_data(set_id);
create index if not exists IndexVariableData on variable_data(var_id);

create table if not exists files (
    file_id       integer primary key autoincrement not null,
    file_location text not null,
    md5_checksum  text unique not null,
    file_kind     text not null,
    file_type     text not null
);

create table if not exists model_has_file (
    model_id integer not null,
    file_id  integer not null,
    primary key (model_id, file_id),
    foreign key (model_id) references models(model_id) on delete cascade,
    foreign key (file_id) references files(file_id) on delete restrict
);

create table if not exists data_set_has_file (
    data_set_id integer not null,
    file_id     integer not null,
    primary key (data_set_id, file_id),
    foreign key (data_set_id) references data_sets(data_set_id) on delete cascade,
    foreign key (file_id) references files(file_id) on delete restrict
);

create table if not exists solution_has_file (
    solution_id integer not null,
    file_id     integer not null,
    primary key (solution_id, file_id),
    foreign key (solution_id) references solutions(solution_id) on delete cascade,
    foreign key (file_id) references files(file_id) on delete restrict
);
"#;
